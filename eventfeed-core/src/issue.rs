//! GitHub issue payload types.
//!
//! These mirror the subset of the GitHub issues API we consume. The payload
//! is treated as a read-only external structure: every field tolerates
//! absence, since webhook payloads and listing responses are not under our
//! control.

use serde::{Deserialize, Serialize};

/// An inbound issue, either from a webhook payload or the listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub user: Option<IssueUser>,
    #[serde(default)]
    pub labels: Option<Vec<IssueLabel>>,
    /// Present when the "issue" is actually a pull request. Bulk sync drops
    /// these during pagination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueUser {
    #[serde(default)]
    pub login: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueLabel {
    #[serde(default)]
    pub name: String,
}
