// Destination platform trait — the swap-ready abstraction.
//
// The cross-poster and the watcher loops talk to Stacker News through
// this trait so tests can substitute a mock that records calls and
// injects dupes or failures.

use async_trait::async_trait;

use super::client::SnClient;
use super::types::Dupe;
use crate::error::Result;

/// Operations the orchestrator needs from the destination platform.
/// Implementations must be `Send + Sync`; they are shared across the
/// three long-running tasks behind an `Arc`.
#[async_trait]
pub trait Destination: Send + Sync {
    /// Look up existing posts for an exact URL.
    async fn fetch_dupes(&self, url: &str) -> Result<Vec<Dupe>>;

    /// Submit a link post; returns the new (or existing) item id.
    async fn upsert_link(&self, url: &str, title: &str, sub: &str) -> Result<u64>;

    /// Attach a comment to an item; returns the comment id.
    async fn create_comment(&self, parent_id: u64, text: &str) -> Result<u64>;

    /// Whether the account has unseen notifications.
    async fn has_new_notes(&self) -> Result<bool>;

    /// Extend the authenticated session's lifetime.
    async fn refresh_session(&self) -> Result<()>;
}

#[async_trait]
impl Destination for SnClient {
    async fn fetch_dupes(&self, url: &str) -> Result<Vec<Dupe>> {
        SnClient::fetch_dupes(self, url).await
    }

    async fn upsert_link(&self, url: &str, title: &str, sub: &str) -> Result<u64> {
        SnClient::upsert_link(self, url, title, sub).await
    }

    async fn create_comment(&self, parent_id: u64, text: &str) -> Result<u64> {
        SnClient::create_comment(self, parent_id, text).await
    }

    async fn has_new_notes(&self) -> Result<bool> {
        SnClient::has_new_notes(self).await
    }

    async fn refresh_session(&self) -> Result<()> {
        SnClient::refresh_session(self).await
    }
}
