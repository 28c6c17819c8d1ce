//! The event record persisted in the JSON feed.
//!
//! This is the sole contract with the rendering layer: the feed file is a
//! JSON array of these records, keyed by `event_id`. Field values are kept
//! as free-form strings on purpose; downstream consumers decide how to
//! interpret `event_date` and `event_link`.

use serde::{Deserialize, Serialize};

/// One community event, as published in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Unique key, taken from the issue title. May be numeric-looking
    /// ("42") or arbitrary text.
    pub event_id: String,
    pub event_name: String,
    pub event_link: String,
    /// Free-form date text; not validated or normalized at write time.
    pub event_date: String,
    /// Preview image URL, filled in by best-effort enrichment. `null` in
    /// the feed until resolved.
    pub event_image: Option<String>,
}
