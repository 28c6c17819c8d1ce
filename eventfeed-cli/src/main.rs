mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Default feed location, relative to the site checkout.
const DEFAULT_OUTPUT: &str = "public/data/events.json";

/// Authors whose issues become events unless overridden with --author.
const DEFAULT_AUTHORS: [&str; 2] = ["ghspain-user", "alexcerezo"];

#[derive(Parser)]
#[command(name = "eventfeed")]
#[command(about = "Sync GitHub issues into the community events JSON feed")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path of the JSON feed file
    #[arg(long, global = true, env = "OUTPUT_PATH", default_value = DEFAULT_OUTPUT)]
    output: String,

    /// Trusted author login (repeatable); defaults to the community organizers
    #[arg(long = "author", global = true)]
    authors: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync a single issue payload (webhook mode)
    Sync {
        /// The issue payload as JSON
        #[arg(long, env = "ISSUE_JSON")]
        issue_json: Option<String>,

        /// Webhook action tag (opened, edited, ...)
        #[arg(long, env = "ISSUE_ACTION", default_value = "unknown")]
        action: String,
    },
    /// Rebuild the feed from every issue in the repository
    SyncAll {
        /// Repository owner
        #[arg(long, env = "REPO_OWNER", default_value = "alexcerezo")]
        owner: String,

        /// Repository name
        #[arg(long, env = "REPO_NAME", default_value = "ghspain")]
        repo: String,

        /// GitHub access token for the listing endpoint
        #[arg(long, env = "GITHUB_TOKEN")]
        token: Option<String>,
    },
    /// Fill in missing preview images on existing feed records
    UpdateImages,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let authors = if cli.authors.is_empty() {
        DEFAULT_AUTHORS.iter().map(|a| a.to_string()).collect()
    } else {
        cli.authors
    };

    match cli.command {
        Commands::Sync { issue_json, action } => {
            commands::sync::run(&cli.output, &authors, issue_json, &action).await
        }
        Commands::SyncAll { owner, repo, token } => {
            commands::sync_all::run(&cli.output, &authors, &owner, &repo, token).await
        }
        Commands::UpdateImages => commands::update_images::run(&cli.output).await,
    }
}
