//! Best-effort preview image resolution.
//!
//! Event pages on the event platform expose an Open Graph image tag; we
//! fetch the page once and pull out `meta[property="og:image"]`. Resolution
//! failures of any kind (network, non-HTML body, missing tag) degrade to
//! `None` — enrichment must never block an upsert.

use std::time::Duration;

use scraper::{Html, Selector};

use crate::error::{SyncError, SyncResult};

/// Only links pointing at the event platform are fetched; anything else
/// resolves to `None` without a network call.
pub const EVENT_HOST: &str = "meetup.com";

/// Cap on how long a single page fetch may take. The feed is regenerated in
/// CI, so a hung remote server must not stall the whole sync.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "eventfeed-sync/0.2";

pub struct ImageResolver {
    client: reqwest::Client,
}

impl ImageResolver {
    pub fn new() -> SyncResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SyncError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(ImageResolver { client })
    }

    /// Resolve the Open Graph image URL for an event link. A single attempt;
    /// never fails the caller.
    pub async fn resolve(&self, event_link: &str) -> Option<String> {
        if event_link.is_empty() || !event_link.contains(EVENT_HOST) {
            return None;
        }

        let response = match self.client.get(event_link).send().await {
            Ok(response) => response,
            Err(e) => {
                eprintln!("  Warning: could not fetch {event_link}: {e}");
                return None;
            }
        };

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                eprintln!("  Warning: could not read body of {event_link}: {e}");
                return None;
            }
        };

        extract_og_image(&body)
    }
}

/// Extract the content attribute of the Open Graph image meta-tag.
pub fn extract_og_image(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"meta[property="og:image"]"#).expect("selector should parse");

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(String::from)
}
