//! Core sync logic for the eventfeed ecosystem.
//!
//! This crate turns GitHub issues (used as a lightweight event-submission
//! form) into a static JSON feed:
//! - `filter` gates issues on author identity and the event label
//! - `parse` turns a qualifying issue into an `EventRecord`
//! - `image` resolves a preview image from the event page, best-effort
//! - `store` owns the load/upsert/sort/save cycle over the feed file
//! - `sync` wires those together for the three entry modes

pub mod error;
pub mod event;
pub mod filter;
pub mod github;
pub mod image;
pub mod issue;
pub mod parse;
pub mod store;
pub mod sync;

pub use error::{SyncError, SyncResult};
pub use event::EventRecord;
pub use filter::AccessFilter;
pub use github::{GitHubIssues, IssueSource};
pub use image::ImageResolver;
pub use issue::Issue;
pub use store::EventStore;
pub use sync::{IssueStatus, SyncOutcome, SyncSummary};
