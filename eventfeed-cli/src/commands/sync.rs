use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use eventfeed_core::sync::{self, IssueStatus};
use eventfeed_core::{AccessFilter, EventStore, ImageResolver, Issue};

pub async fn run(
    output: &str,
    authors: &[String],
    issue_json: Option<String>,
    action: &str,
) -> Result<()> {
    let issue_json = issue_json.context(
        "No issue payload provided.\n\
        Pass --issue-json or set the ISSUE_JSON environment variable.",
    )?;

    let issue: Issue =
        serde_json::from_str(&issue_json).context("Could not parse the issue payload as JSON")?;

    let store = EventStore::new(output);
    let filter = AccessFilter::new(authors.iter().cloned());
    let resolver = ImageResolver::new()?;

    let outcome = sync::sync_issue(&store, &filter, &resolver, &issue, action).await?;

    match outcome.status {
        IssueStatus::Skipped => println!("{}", "Issue skipped, feed unchanged.".yellow()),
        IssueStatus::Added | IssueStatus::Updated => {
            println!("Feed written to {} ({} events)", output, outcome.events.len())
        }
    }

    Ok(())
}
