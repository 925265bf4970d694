// Hacker News client — unauthenticated reads from the Firebase API.
//
// API docs: https://github.com/HackerNews/API. All endpoints are public;
// the bot only ever reads from HN, never writes.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex_lite::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::Result;

/// Default base URL for the HN Firebase API.
pub const DEFAULT_FIREBASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

/// Web frontend base URL, used for permalinks in comments and embeds.
pub const HN_URL: &str = "https://news.ycombinator.com";

/// The first page of top stories; everything past it is noise.
pub const TOP_STORIES_LIMIT: usize = 30;

/// A story as returned by the Firebase item endpoint.
///
/// `url` is empty for self-posts (Ask HN, Show HN without a link);
/// the canonical permalink derived from `id` stands in for it then.
#[derive(Debug, Clone, Deserialize)]
pub struct Story {
    pub id: u64,
    /// Username of the author.
    #[serde(default)]
    pub by: String,
    /// Submission time (UNIX seconds on the wire).
    #[serde(with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,
    /// Total comment count.
    #[serde(default)]
    pub descendants: i64,
    /// Ids of the story's top-level comments, in rank order.
    #[serde(default)]
    pub kids: Vec<u64>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// Thin HTTP client for the HN Firebase API.
pub struct HnClient {
    client: reqwest::Client,
    base_url: String,
}

impl HnClient {
    /// Create a new client pointing at the given base URL.
    ///
    /// Defaults to the public Firebase endpoint; pass a different URL
    /// for testing.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("kindling/0.1 (hn-to-sn cross-poster)")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the current front page: the first `limit` top-story ids,
    /// each resolved to a full `Story`.
    pub async fn top_stories(&self, limit: usize) -> Result<Vec<Story>> {
        let url = format!("{}/topstories.json", self.base_url);
        let ids: Vec<u64> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(total = ids.len(), limit, "Fetched top story ids");

        let mut stories = Vec::with_capacity(limit);
        for id in ids.into_iter().take(limit) {
            stories.push(self.item(id).await?);
        }
        Ok(stories)
    }

    /// Fetch a single story by id.
    pub async fn item(&self, id: u64) -> Result<Story> {
        let url = format!("{}/item/{}.json", self.base_url, id);
        let story: Story = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(id, title = %story.title, "Fetched story");
        Ok(story)
    }
}

/// Canonical permalink for an HN item.
pub fn item_link(id: u64) -> String {
    format!("{HN_URL}/item?id={id}")
}

/// Profile link for an HN user.
pub fn user_link(user: &str) -> String {
    format!("{HN_URL}/user?id={user}")
}

/// Extract the item id from an HN item link, if the input is one.
pub fn parse_item_link(link: &str) -> Option<u64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?:https?://)?news\.ycombinator\.com/item\?id=([0-9]+)")
            .expect("item link regex is valid")
    });
    re.captures(link)?.get(1)?.as_str().parse().ok()
}
