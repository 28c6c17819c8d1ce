//! The JSON-backed event collection.
//!
//! All three sync modes reconcile through this store: load the full array,
//! upsert by `event_id`, re-sort, write the whole file back. There are no
//! partial or append-only writes; the persisted file is always a complete,
//! sorted snapshot.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::error::{SyncError, SyncResult};
use crate::event::EventRecord;

/// Whether an upsert replaced an existing record or appended a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Added,
    Updated,
}

pub struct EventStore {
    path: PathBuf,
}

impl EventStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        EventStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted collection. An absent file is a normal empty
    /// state; an unparseable file is reset to empty with a warning. The
    /// reset silently discards prior data — a known, accepted risk, since a
    /// fresh feed is preferred over blocking the pipeline.
    pub fn load(&self) -> Vec<EventRecord> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str(&content) {
            Ok(events) => events,
            Err(e) => {
                eprintln!(
                    "  Warning: could not parse existing feed at {}: {e}. Starting fresh.",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    /// Update-or-insert keyed on exact `event_id` equality. Replaces the
    /// whole record when the id exists, appends otherwise. This is what
    /// enforces the at-most-one-record-per-id invariant.
    pub fn upsert(events: &mut Vec<EventRecord>, record: EventRecord) -> UpsertOutcome {
        match events.iter_mut().find(|e| e.event_id == record.event_id) {
            Some(existing) => {
                *existing = record;
                UpsertOutcome::Updated
            }
            None => {
                events.push(record);
                UpsertOutcome::Added
            }
        }
    }

    /// Canonical feed order: numeric ascending when both ids parse fully as
    /// integers, lexicographic otherwise. The sort is stable, so ties keep
    /// encounter order.
    pub fn sort(events: &mut [EventRecord]) {
        events.sort_by(|a, b| compare_event_ids(&a.event_id, &b.event_id));
    }

    /// Serialize the full collection, pretty-printed, over the feed file.
    /// Writes go through a temp file + rename so a crash mid-write never
    /// leaves a truncated feed behind.
    pub fn save(&self, events: &[EventRecord]) -> SyncResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(events)
            .map_err(|e| SyncError::Serialization(e.to_string()))?;

        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }

    /// Remove the feed file outright. Bulk sync rebuilds from scratch
    /// instead of merging into whatever is already there.
    pub fn delete(&self) -> SyncResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn compare_event_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> EventRecord {
        EventRecord {
            event_id: id.to_string(),
            event_name: format!("Event {id}"),
            event_link: String::new(),
            event_date: String::new(),
            event_image: None,
        }
    }

    fn ids(events: &[EventRecord]) -> Vec<&str> {
        events.iter().map(|e| e.event_id.as_str()).collect()
    }

    #[test]
    fn test_load_missing_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = EventStore::new(dir.path().join("missing.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, "{not valid json").unwrap();

        let store = EventStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_creates_parent_directory_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("public/data/events.json");
        let store = EventStore::new(&path);

        let events = vec![record("5"), record("10")];
        store.save(&events).unwrap();

        assert!(path.exists());
        assert_eq!(store.load(), events);
    }

    #[test]
    fn test_save_pretty_prints_with_stable_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        EventStore::new(&path).save(&[record("1")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  {"));
        let id_pos = content.find("event_id").unwrap();
        let image_pos = content.find("event_image").unwrap();
        assert!(id_pos < image_pos, "struct field order should be preserved");
        assert!(content.contains("\"event_image\": null"));
    }

    #[test]
    fn test_save_empty_collection_writes_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        let store = EventStore::new(&path);

        store.save(&[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_upsert_appends_new_id() {
        let mut events = vec![record("1")];
        let outcome = EventStore::upsert(&mut events, record("2"));

        assert_eq!(outcome, UpsertOutcome::Added);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_upsert_replaces_matching_id_in_place() {
        let mut events = vec![record("1"), record("2")];
        let mut updated = record("1");
        updated.event_name = "Renamed".to_string();

        let outcome = EventStore::upsert(&mut events, updated);

        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_name, "Renamed");
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let mut events = vec![record("1")];
        EventStore::upsert(&mut events, record("2"));
        let after_first = events.clone();

        EventStore::upsert(&mut events, record("2"));
        assert_eq!(events, after_first);
    }

    #[test]
    fn test_sort_numeric_when_both_ids_numeric() {
        let mut events = vec![record("10"), record("2"), record("5")];
        EventStore::sort(&mut events);
        assert_eq!(ids(&events), ["2", "5", "10"]);
    }

    #[test]
    fn test_sort_lexicographic_for_text_ids() {
        let mut events = vec![record("madrid"), record("barcelona"), record("valencia")];
        EventStore::sort(&mut events);
        assert_eq!(ids(&events), ["barcelona", "madrid", "valencia"]);
    }

    #[test]
    fn test_sort_mixed_ids_fall_back_to_string_comparison() {
        // "10" vs "taller" cannot compare numerically, so that pair is
        // ordered as strings.
        let mut events = vec![record("taller"), record("10"), record("2")];
        EventStore::sort(&mut events);
        assert_eq!(ids(&events), ["2", "10", "taller"]);
    }

    #[test]
    fn test_upsert_new_numeric_id_sorts_into_place() {
        // Existing collection ["5", "10"]; upserting "2" must land first.
        let mut events = vec![record("5"), record("10")];
        EventStore::upsert(&mut events, record("2"));
        EventStore::sort(&mut events);
        assert_eq!(ids(&events), ["2", "5", "10"]);
    }

    #[test]
    fn test_record_without_image_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = EventStore::new(dir.path().join("events.json"));

        let mut events = store.load();
        EventStore::upsert(&mut events, record("1"));
        store.save(&events).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].event_image, None);
    }

    #[test]
    fn test_delete_is_quiet_when_file_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = EventStore::new(dir.path().join("events.json"));

        store.delete().unwrap();

        store.save(&[record("1")]).unwrap();
        store.delete().unwrap();
        assert!(!store.path().exists());
    }
}
