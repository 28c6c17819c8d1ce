//! GitHub issue listing with pagination.
//!
//! Bulk sync reads the full issue history of the repository through the
//! REST listing endpoint. The fetch loop is generic over `IssueSource` so
//! pagination behavior can be exercised against an in-memory source in
//! tests.

use crate::error::{SyncError, SyncResult};
use crate::issue::Issue;

/// Fixed page size for the listing endpoint. A page shorter than this
/// signals the end of pagination.
pub const PER_PAGE: usize = 100;

const API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = "eventfeed-sync/0.2";

/// One page of the issue listing. Pages are 1-based.
#[allow(async_fn_in_trait)]
pub trait IssueSource {
    async fn fetch_page(&self, page: u32) -> SyncResult<Vec<Issue>>;
}

/// Issue listing backed by the GitHub REST API.
pub struct GitHubIssues {
    client: reqwest::Client,
    owner: String,
    repo: String,
    token: Option<String>,
}

impl GitHubIssues {
    pub fn new(owner: &str, repo: &str, token: Option<String>) -> SyncResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SyncError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(GitHubIssues {
            client,
            owner: owner.to_string(),
            repo: repo.to_string(),
            token,
        })
    }
}

impl IssueSource for GitHubIssues {
    async fn fetch_page(&self, page: u32) -> SyncResult<Vec<Issue>> {
        let url = format!(
            "{API_BASE}/repos/{}/{}/issues?state=all&per_page={PER_PAGE}&page={page}",
            self.owner, self.repo
        );

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github.v3+json");

        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| SyncError::GitHubApi(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(SyncError::GitHubApi(format!("{status} - {message}")));
        }

        response
            .json::<Vec<Issue>>()
            .await
            .map_err(|e| SyncError::GitHubApi(format!("could not parse issue listing: {e}")))
    }
}

/// Fetch every issue in the repository, page by page, dropping pull
/// requests as they come in. Stops on the first empty or short page.
pub async fn fetch_all_issues<S: IssueSource>(source: &S) -> SyncResult<Vec<Issue>> {
    let mut issues = Vec::new();
    let mut page = 1u32;

    loop {
        let page_issues = source.fetch_page(page).await?;
        let page_len = page_issues.len();

        let real_issues: Vec<Issue> = page_issues
            .into_iter()
            .filter(|issue| !issue.is_pull_request())
            .collect();

        println!(
            "  Page {page}: {} issues ({} total)",
            real_issues.len(),
            issues.len() + real_issues.len()
        );
        issues.extend(real_issues);

        if page_len < PER_PAGE {
            break;
        }
        page += 1;
    }

    Ok(issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory issue source that serves fixed pages and counts fetches.
    pub(crate) struct MockSource {
        pages: Vec<Vec<Issue>>,
        fetches: AtomicUsize,
    }

    impl MockSource {
        pub(crate) fn new(pages: Vec<Vec<Issue>>) -> Self {
            MockSource {
                pages,
                fetches: AtomicUsize::new(0),
            }
        }

        pub(crate) fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    impl IssueSource for MockSource {
        async fn fetch_page(&self, page: u32) -> SyncResult<Vec<Issue>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .pages
                .get(page as usize - 1)
                .cloned()
                .unwrap_or_default())
        }
    }

    fn plain_issue(number: u64) -> Issue {
        Issue {
            number,
            title: number.to_string(),
            ..Issue::default()
        }
    }

    fn paged(issues: Vec<Issue>) -> Vec<Vec<Issue>> {
        let mut pages = Vec::new();
        let mut iter = issues.into_iter().peekable();
        while iter.peek().is_some() {
            pages.push(iter.by_ref().take(PER_PAGE).collect());
        }
        pages
    }

    #[tokio::test]
    async fn test_250_issues_fetch_exactly_three_pages() {
        let issues: Vec<Issue> = (1..=250).map(plain_issue).collect();
        let source = MockSource::new(paged(issues));

        let fetched = fetch_all_issues(&source).await.unwrap();

        assert_eq!(fetched.len(), 250);
        // Third page returns 50 < PER_PAGE items, terminating the loop.
        assert_eq!(source.fetch_count(), 3);
    }

    #[tokio::test]
    async fn test_full_last_page_triggers_one_extra_empty_fetch() {
        let issues: Vec<Issue> = (1..=200).map(plain_issue).collect();
        let mut pages = paged(issues);
        pages.push(Vec::new());
        let source = MockSource::new(pages);

        let fetched = fetch_all_issues(&source).await.unwrap();

        assert_eq!(fetched.len(), 200);
        assert_eq!(source.fetch_count(), 3);
    }

    #[tokio::test]
    async fn test_empty_repository_yields_no_issues() {
        let source = MockSource::new(vec![]);
        let fetched = fetch_all_issues(&source).await.unwrap();

        assert!(fetched.is_empty());
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_pull_requests_are_dropped_during_pagination() {
        let mut issues: Vec<Issue> = (1..=10).map(plain_issue).collect();
        issues[3].pull_request = Some(serde_json::json!({"url": "https://example.com/pr/4"}));
        issues[7].pull_request = Some(serde_json::json!({"url": "https://example.com/pr/8"}));
        let source = MockSource::new(paged(issues));

        let fetched = fetch_all_issues(&source).await.unwrap();

        assert_eq!(fetched.len(), 8);
        assert!(fetched.iter().all(|issue| !issue.is_pull_request()));
    }

    #[tokio::test]
    async fn test_source_error_propagates() {
        struct FailingSource;
        impl IssueSource for FailingSource {
            async fn fetch_page(&self, _page: u32) -> SyncResult<Vec<Issue>> {
                Err(SyncError::GitHubApi("403 Forbidden - rate limited".into()))
            }
        }

        let err = fetch_all_issues(&FailingSource).await.unwrap_err();
        assert!(matches!(err, SyncError::GitHubApi(_)));
    }
}
