//! The author/label qualification gate.
//!
//! Only issues opened by a trusted author and carrying the event label make
//! it into the feed. Everything else is a normal, logged skip rather than an
//! error.

use std::collections::HashSet;

use crate::issue::Issue;

/// Label name (compared case-insensitively) that marks an issue as an event.
pub const EVENT_LABEL: &str = "event";

/// Decides whether an issue qualifies for sync.
///
/// The allow-list is injected configuration so the filter can be exercised
/// against arbitrary inputs without code changes.
#[derive(Debug, Clone)]
pub struct AccessFilter {
    allowed_authors: HashSet<String>,
}

impl AccessFilter {
    pub fn new<I, S>(allowed_authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AccessFilter {
            allowed_authors: allowed_authors.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true iff the author is allow-listed AND some label name
    /// lower-cases to "event". A missing `user` or `labels` field is a
    /// rejection, never an error. Rejections print a diagnostic naming the
    /// failing condition(s).
    pub fn qualifies(&self, issue: &Issue) -> bool {
        let author_ok = issue
            .user
            .as_ref()
            .is_some_and(|u| self.allowed_authors.contains(&u.login));

        let label_ok = issue
            .labels
            .as_ref()
            .is_some_and(|labels| labels.iter().any(|l| l.name.eq_ignore_ascii_case(EVENT_LABEL)));

        let ok = author_ok && label_ok;
        if !ok {
            let author = issue
                .user
                .as_ref()
                .map(|u| u.login.as_str())
                .unwrap_or("unknown");
            let labels = issue
                .labels
                .as_ref()
                .map(|labels| {
                    labels
                        .iter()
                        .map(|l| l.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            println!(
                "  Issue #{} does not qualify: author={author} (allowed: {}), event label={label_ok} (labels: {labels})",
                issue.number,
                self.allowed_authors_sorted().join(", "),
            );
        }
        ok
    }

    fn allowed_authors_sorted(&self) -> Vec<&str> {
        let mut authors: Vec<&str> = self.allowed_authors.iter().map(String::as_str).collect();
        authors.sort_unstable();
        authors
    }
}
