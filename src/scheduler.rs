// The main cycle and task wiring.
//
// One fetch/select/post pass per hour, aligned to wall-clock hour marks.
// Alignment is recomputed from the clock every iteration instead of
// sleeping a fixed duration, so processing time never accumulates drift.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use tracing::{error, info};

use crate::discord::ChatSink;
use crate::hn::{HnClient, TOP_STORIES_LIMIT};
use crate::poster;
use crate::sn::Destination;
use crate::watch;

/// The next wall-clock instant aligned to `period` strictly after `now`.
///
/// An input already on a boundary maps to the following one, so a loop
/// that wakes exactly on the mark still sleeps a full period.
pub fn next_boundary(now: DateTime<Utc>, period: Duration) -> DateTime<Utc> {
    let period_secs = period.num_seconds().max(1);
    let next = (now.timestamp() / period_secs + 1) * period_secs;
    Utc.timestamp_opt(next, 0)
        .single()
        .unwrap_or_else(|| now + period)
}

/// Sleep until the next `period`-aligned wall-clock boundary.
pub async fn sleep_until_boundary(period: Duration) {
    let now = Utc::now();
    let next = next_boundary(now, period);
    let wait = (next - now).to_std().unwrap_or_default();
    tokio::time::sleep(wait).await;
}

/// One cross-posting pass: fetch the front page, select candidates,
/// post each one. Fetch failures are reported and skip the pass; item
/// failures are isolated inside `post_batch`. Nothing here crashes the
/// process.
pub async fn run_cycle(hn: &HnClient, dest: &dyn Destination, chat: &dyn ChatSink, sub: &str) {
    match hn.top_stories(TOP_STORIES_LIMIT).await {
        Ok(stories) => {
            let candidates = poster::select_candidates(&stories);
            info!(
                fetched = stories.len(),
                selected = candidates.len(),
                "Starting cross-post pass"
            );
            poster::post_batch(dest, chat, candidates, sub).await;
        }
        Err(e) => {
            error!(error = %e, "Failed to fetch top stories");
            chat.send_error(&format!("failed to fetch top stories: {e}"))
                .await;
        }
    }
}

/// Hour-aligned main cycle loop. Posts once immediately on startup,
/// then on every hour mark.
pub async fn cycle_loop(
    hn: Arc<HnClient>,
    dest: Arc<dyn Destination>,
    chat: Arc<dyn ChatSink>,
    sub: String,
) {
    loop {
        run_cycle(hn.as_ref(), dest.as_ref(), chat.as_ref(), &sub).await;
        sleep_until_boundary(Duration::hours(1)).await;
    }
}

/// Spawn the three long-running tasks and park forever.
///
/// There is deliberately no shutdown path: the loops own no state worth
/// flushing and the process is stopped by killing it. The join only
/// resolves if a task panics, which is itself a bug worth dying loudly on.
pub async fn run(
    hn: Arc<HnClient>,
    dest: Arc<dyn Destination>,
    chat: Arc<dyn ChatSink>,
    sub: String,
) -> anyhow::Result<()> {
    info!(sub = %sub, "Starting kindling: main cycle, notification watcher, session keep-alive");

    let cycle = tokio::spawn(cycle_loop(hn, dest.clone(), chat.clone(), sub));
    let notes = tokio::spawn(watch::note_loop(dest.clone(), chat.clone()));
    let keepalive = tokio::spawn(watch::session_loop(dest, chat));

    tokio::try_join!(cycle, notes, keepalive)?;
    anyhow::bail!("orchestrator tasks exited unexpectedly")
}
