// Authenticated Stacker News GraphQL client.
//
// A thin reqwest wrapper with a generic query helper. The session cookie
// lives in a RwLock cell: every request reads it, only the keep-alive
// loop writes it. A request racing a refresh may send the previous
// cookie; that is fine, the old session stays valid during the grace
// window after a refresh.

use reqwest::header::{HeaderMap, COOKIE, SET_COOKIE};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::types::{
    CreateCommentData, Dupe, DupesData, GqlResponse, HasNewNotesData, UpsertLinkData,
};
use crate::error::{Error, Result};

/// Default Stacker News base URL.
pub const DEFAULT_SN_URL: &str = "https://stacker.news";

/// Name of the next-auth session cookie the API authenticates with.
const SESSION_COOKIE: &str = "__Secure-next-auth.session-token";

pub struct SnClient {
    client: reqwest::Client,
    base_url: String,
    auth_cookie: RwLock<String>,
}

impl SnClient {
    /// Create a new client for the given base URL and session cookie.
    pub fn new(base_url: &str, auth_cookie: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("kindling/0.1 (hn-to-sn cross-poster)")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_cookie: RwLock::new(auth_cookie),
        })
    }

    /// Execute a GraphQL document and deserialize `data`.
    ///
    /// Remote-reported errors become `Error::Remote` and propagate
    /// unmodified; transport and decode failures become `Error::Transport`.
    async fn gql<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        let url = format!("{}/api/graphql", self.base_url);
        let cookie = self.auth_cookie.read().await.clone();

        let resp: GqlResponse<T> = self
            .client
            .post(&url)
            .header(COOKIE, cookie)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?
            .json()
            .await?;

        unwrap_envelope(resp)
    }

    /// Look up existing posts for a URL. Empty means the link is fresh.
    pub async fn fetch_dupes(&self, url: &str) -> Result<Vec<Dupe>> {
        debug!(url, "Fetching SN dupes");

        let query = r#"
            query Dupes($url: String!) {
                dupes(url: $url) {
                    id
                    url
                    title
                    user {
                        name
                    }
                    createdAt
                    sats
                    ncomments
                }
            }"#;
        let data: DupesData = self.gql(query, json!({ "url": url })).await?;

        debug!(url, matches = data.dupes.len(), "Fetched SN dupes");
        Ok(data.dupes)
    }

    /// Create (or update) a link post in the given territory.
    pub async fn upsert_link(&self, url: &str, title: &str, sub: &str) -> Result<u64> {
        debug!(url, sub, "Posting link to SN");

        let query = r#"
            mutation upsertLink($url: String!, $title: String!, $sub: String!) {
                upsertLink(url: $url, title: $title, sub: $sub) {
                    id
                }
            }"#;
        let data: UpsertLinkData = self
            .gql(query, json!({ "url": url, "title": title, "sub": sub }))
            .await?;

        info!(url, id = data.upsert_link.id, "Posted link to SN");
        Ok(data.upsert_link.id)
    }

    /// Attach a comment to an existing item.
    pub async fn create_comment(&self, parent_id: u64, text: &str) -> Result<u64> {
        debug!(parent_id, "Commenting on SN post");

        let query = r#"
            mutation createComment($text: String!, $parentId: ID!) {
                createComment(text: $text, parentId: $parentId) {
                    id
                }
            }"#;
        let data: CreateCommentData = self
            .gql(query, json!({ "text": text, "parentId": parent_id }))
            .await?;

        debug!(parent_id, comment_id = data.create_comment.id, "Commented on SN post");
        Ok(data.create_comment.id)
    }

    /// Whether the authenticated account has unseen notifications.
    pub async fn has_new_notes(&self) -> Result<bool> {
        let query = r#"
            {
                hasNewNotes
            }"#;
        let data: HasNewNotesData = self.gql(query, Value::Null).await?;

        debug!(has_new_notes = data.has_new_notes, "Checked SN notifications");
        Ok(data.has_new_notes)
    }

    /// Refresh the authenticated session before it expires.
    ///
    /// next-auth extends the session on any hit to the session endpoint.
    /// If the server rotates the cookie, the new value replaces the cell;
    /// otherwise the existing cookie simply keeps its extended lifetime.
    pub async fn refresh_session(&self) -> Result<()> {
        let url = format!("{}/api/auth/session", self.base_url);
        let cookie = self.auth_cookie.read().await.clone();

        let resp = self
            .client
            .get(&url)
            .header(COOKIE, cookie)
            .send()
            .await?
            .error_for_status()?;

        if let Some(rotated) = extract_session_cookie(resp.headers()) {
            *self.auth_cookie.write().await = rotated;
            info!("SN session cookie rotated");
        } else {
            debug!("SN session refreshed");
        }
        Ok(())
    }
}

/// Resolve a GraphQL envelope: a populated `errors` array wins, then
/// `data`; a body with neither is malformed, not a remote error.
fn unwrap_envelope<T>(resp: GqlResponse<T>) -> Result<T> {
    if !resp.errors.is_empty() {
        return Err(Error::Remote(resp.errors));
    }
    resp.data.ok_or_else(|| {
        Error::Malformed("response contained neither data nor errors".to_string())
    })
}

/// Find a rotated session cookie among `Set-Cookie` headers, stripped
/// of its attributes. None when the server did not rotate.
fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(SET_COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        let Some(pair) = raw.split(';').next() else { continue };
        let pair = pair.trim();
        if pair.starts_with(SESSION_COOKIE) {
            return Some(pair.to_string());
        }
    }
    None
}

/// Permalink for a Stacker News item.
pub fn item_link(id: u64) -> String {
    format!("{DEFAULT_SN_URL}/items/{id}")
}
