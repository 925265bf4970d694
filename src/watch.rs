// Background watchers: the notification edge-detector and the session
// keep-alive. Both run as independent minute/hour-aligned loops that
// report failures to Discord and never terminate.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};

use crate::discord::{self, ChatSink};
use crate::scheduler::sleep_until_boundary;
use crate::sn::Destination;

/// Edge detector over the "has unseen notifications" flag.
///
/// Fires exactly once per false->true transition. Steady true stays
/// silent until the flag has been observed false again.
pub struct NoteWatcher {
    prev: bool,
}

impl NoteWatcher {
    pub fn new() -> Self {
        Self { prev: false }
    }

    /// Record one successful observation of the flag; returns whether
    /// an alert should fire. Failed fetches must not call this, so a
    /// transient error cannot swallow or duplicate an edge.
    pub fn observe(&mut self, current: bool) -> bool {
        let fire = !self.prev && current;
        self.prev = current;
        fire
    }
}

impl Default for NoteWatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// One watcher iteration: fetch the flag, alert on a rising edge,
/// report fetch failures without touching the edge state.
pub async fn poll_notes_once(
    dest: &dyn Destination,
    chat: &dyn ChatSink,
    watcher: &mut NoteWatcher,
) {
    match dest.has_new_notes().await {
        Ok(flag) => {
            if watcher.observe(flag) {
                info!("New SN notifications");
                chat.send_embed(discord::notifications_embed()).await;
            }
        }
        Err(e) => {
            warn!(error = %e, "Notification check failed");
            chat.send_error(&format!("notification check failed: {e}"))
                .await;
        }
    }
}

/// Minute-aligned notification watcher loop.
pub async fn note_loop(dest: Arc<dyn Destination>, chat: Arc<dyn ChatSink>) {
    let mut watcher = NoteWatcher::new();
    loop {
        sleep_until_boundary(Duration::minutes(1)).await;
        poll_notes_once(dest.as_ref(), chat.as_ref(), &mut watcher).await;
    }
}

/// One keep-alive iteration: refresh the session, report failures.
///
/// A single failed refresh is reported and tolerated. The session
/// stays valid for a grace period, and the next tick tries again.
pub async fn poll_session_once(dest: &dyn Destination, chat: &dyn ChatSink) {
    match dest.refresh_session().await {
        Ok(()) => debug!("Session refreshed"),
        Err(e) => {
            warn!(error = %e, "Session refresh failed");
            chat.send_error(&format!("session refresh failed: {e}")).await;
        }
    }
}

/// Hour-aligned session keep-alive loop.
pub async fn session_loop(dest: Arc<dyn Destination>, chat: Arc<dyn ChatSink>) {
    loop {
        sleep_until_boundary(Duration::hours(1)).await;
        poll_session_once(dest.as_ref(), chat.as_ref()).await;
    }
}
