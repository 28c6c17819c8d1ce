//! Issue-to-event parsing.
//!
//! The submission convention is fixed: the issue title carries the event id
//! and the body carries `name;link;date`. Parsing is a pure, total function
//! with no failure modes; bodies with fewer than three fields degrade to
//! empty strings, and anything past the third field is ignored. Image
//! resolution is layered on top by the orchestrators, not here.

use crate::event::EventRecord;
use crate::issue::Issue;

/// Parse one issue into an event record. Never fails.
pub fn parse_issue(issue: &Issue) -> EventRecord {
    let mut parts = issue.body.split(';').map(str::trim);

    let event_name = parts.next().unwrap_or_default().to_string();
    let event_link = parts.next().unwrap_or_default().to_string();
    let event_date = parts.next().unwrap_or_default().to_string();

    EventRecord {
        event_id: issue.title.trim().to_string(),
        event_name,
        event_link,
        event_date,
        event_image: None,
    }
}
