use anyhow::Result;
use owo_colors::OwoColorize;

use eventfeed_core::sync;
use eventfeed_core::{AccessFilter, EventStore, GitHubIssues, ImageResolver};

pub async fn run(
    output: &str,
    authors: &[String],
    owner: &str,
    repo: &str,
    token: Option<String>,
) -> Result<()> {
    println!("Syncing all issues from {owner}/{repo}");
    println!("Output file: {output}");
    if token.is_none() {
        println!(
            "{}",
            "No GITHUB_TOKEN set; unauthenticated requests are rate-limited.".yellow()
        );
    }

    let source = GitHubIssues::new(owner, repo, token)?;
    let store = EventStore::new(output);
    let filter = AccessFilter::new(authors.iter().cloned());
    let resolver = ImageResolver::new()?;

    let summary = sync::sync_all(&source, &store, &filter, &resolver).await?;

    println!(
        "\n{} added, {} updated, {} skipped, {} failed ({} issues fetched)",
        summary.added, summary.updated, summary.skipped, summary.failed, summary.fetched
    );
    if summary.failed > 0 {
        println!("{}", format!("{} issue(s) failed to sync", summary.failed).red());
    }

    Ok(())
}
