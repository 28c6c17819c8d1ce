//! Sync orchestrators.
//!
//! Three entry modes drive the store: single-issue sync (webhook payloads),
//! bulk sync (full-repository rebuild via the paginated listing), and an
//! image-refresh pass over existing records. All three reconcile through
//! the same upsert contract.

use crate::error::{SyncError, SyncResult};
use crate::event::EventRecord;
use crate::filter::AccessFilter;
use crate::github::{IssueSource, fetch_all_issues};
use crate::image::ImageResolver;
use crate::issue::Issue;
use crate::parse::parse_issue;
use crate::store::{EventStore, UpsertOutcome};

/// How a single-issue sync ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueStatus {
    /// Issue failed the access filter; the store was left untouched.
    Skipped,
    Added,
    Updated,
}

/// Machine-readable result of a single-issue sync.
#[derive(Debug)]
pub struct SyncOutcome {
    pub status: IssueStatus,
    /// The collection as persisted (or as loaded, when skipped).
    pub events: Vec<EventRecord>,
}

/// Per-issue reconciliation counts for a bulk sync.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncSummary {
    /// Issues fetched from the listing (pull requests excluded).
    pub fetched: usize,
    /// Issues that passed the access filter.
    pub qualified: usize,
    pub added: usize,
    pub updated: usize,
    /// Issues rejected by the access filter.
    pub skipped: usize,
    /// Qualifying issues that failed to sync; the batch continues past them.
    pub failed: usize,
}

/// Sync one issue into the feed.
///
/// A filter rejection is a normal skip: the existing collection is returned
/// unchanged and nothing is written. Otherwise the issue is parsed, the
/// preview image resolved best-effort, and the record upserted, sorted and
/// persisted.
pub async fn sync_issue(
    store: &EventStore,
    filter: &AccessFilter,
    resolver: &ImageResolver,
    issue: &Issue,
    action: &str,
) -> SyncResult<SyncOutcome> {
    println!("Processing issue #{} (action: {action})", issue.number);

    if !filter.qualifies(issue) {
        println!("  Skipped issue #{}", issue.number);
        return Ok(SyncOutcome {
            status: IssueStatus::Skipped,
            events: store.load(),
        });
    }

    let mut events = store.load();
    let outcome = apply_issue(&mut events, resolver, issue).await?;
    EventStore::sort(&mut events);
    store.save(&events)?;

    println!("  Total events in feed: {}", events.len());

    Ok(SyncOutcome {
        status: match outcome {
            UpsertOutcome::Added => IssueStatus::Added,
            UpsertOutcome::Updated => IssueStatus::Updated,
        },
        events,
    })
}

/// Rebuild the feed from the complete issue history of the repository.
///
/// Pages through the listing, filters the full set, deletes the existing
/// feed file outright, then applies single-issue sync logic to every
/// qualifying issue in one in-memory pass with a single sort + save at the
/// end. One issue's failure is logged and skipped; the loop continues.
pub async fn sync_all<S: IssueSource>(
    source: &S,
    store: &EventStore,
    filter: &AccessFilter,
    resolver: &ImageResolver,
) -> SyncResult<SyncSummary> {
    let all_issues = fetch_all_issues(source).await?;

    let mut summary = SyncSummary {
        fetched: all_issues.len(),
        ..SyncSummary::default()
    };

    let qualifying: Vec<&Issue> = all_issues
        .iter()
        .filter(|issue| filter.qualifies(issue))
        .collect();
    summary.qualified = qualifying.len();
    summary.skipped = summary.fetched - summary.qualified;

    println!(
        "Qualifying issues: {}/{}",
        summary.qualified, summary.fetched
    );

    // Full rebuild: drop whatever feed is there and repopulate from scratch.
    store.delete()?;

    let mut events = Vec::new();
    for issue in qualifying {
        match apply_issue(&mut events, resolver, issue).await {
            Ok(UpsertOutcome::Added) => summary.added += 1,
            Ok(UpsertOutcome::Updated) => summary.updated += 1,
            Err(e) => {
                eprintln!("  Error syncing issue #{}: {e}", issue.number);
                summary.failed += 1;
            }
        }
    }

    EventStore::sort(&mut events);
    store.save(&events)?;

    println!(
        "Sync complete: {} added, {} updated, {} failed ({} in feed)",
        summary.added,
        summary.updated,
        summary.failed,
        events.len()
    );

    Ok(summary)
}

/// Fill in missing preview images on existing records.
///
/// Only records with no image and a non-empty link are attempted; other
/// fields are never touched. The collection is always re-saved, even when
/// nothing changed.
pub async fn refresh_images(store: &EventStore, resolver: &ImageResolver) -> SyncResult<usize> {
    let mut events = store.load();
    let mut resolved = 0usize;

    for event in &mut events {
        if event.event_image.is_some() || event.event_link.is_empty() {
            continue;
        }

        println!("  Fetching image for: {}", event.event_name);
        match resolver.resolve(&event.event_link).await {
            Some(image) => {
                println!("    + {image}");
                event.event_image = Some(image);
                resolved += 1;
            }
            None => println!("    no image found for {}", event.event_name),
        }
    }

    store.save(&events)?;
    println!("Images resolved: {resolved} ({} records)", events.len());

    Ok(resolved)
}

/// Parse, enrich and upsert one qualifying issue into the in-memory
/// collection. An issue whose title yields no event id cannot be keyed and
/// fails here; bulk sync catches that per issue, single-issue sync lets it
/// propagate to the process boundary.
async fn apply_issue(
    events: &mut Vec<EventRecord>,
    resolver: &ImageResolver,
    issue: &Issue,
) -> SyncResult<UpsertOutcome> {
    let mut record = parse_issue(issue);
    if record.event_id.is_empty() {
        return Err(SyncError::InvalidPayload(format!(
            "issue #{} has an empty title, cannot derive an event id",
            issue.number
        )));
    }

    record.event_image = resolver.resolve(&record.event_link).await;

    let outcome = EventStore::upsert(events, record.clone());
    match outcome {
        UpsertOutcome::Added => println!("  + Added: {} - {}", record.event_id, record.event_name),
        UpsertOutcome::Updated => {
            println!("  ~ Updated: {} - {}", record.event_id, record.event_name)
        }
    }
    Ok(outcome)
}
