// The cross-poster: candidate selection, dupes check, post, provenance
// comment, Discord mirror.
//
// `post_story` is the transactional unit. Its failure modes differ in
// kind: a dupes conflict is expected and routed to a human, a committed
// post with a failed comment is partial success (never retried whole),
// everything else is a plain error for the scheduler to report.

use chrono::Utc;
use tracing::{info, warn};

use crate::discord::{self, ChatSink};
use crate::error::{Error, Result};
use crate::hn::{self, Story};
use crate::sn::Destination;
use crate::timefmt;

/// Destination platform rejects longer titles.
pub const MAX_TITLE_CHARS: usize = 80;

/// Pick which fetched stories to cross-post.
///
/// Policy stub: the top story only, in original order. Ranking by
/// relevance is a pluggable future strategy; callers only rely on a
/// deterministic subset that is non-empty whenever the input is.
// TODO: filter by relevance instead of taking the front-page leader
pub fn select_candidates(stories: &[Story]) -> &[Story] {
    let take = stories.len().min(1);
    &stories[..take]
}

/// The URL a story is posted (and dupe-checked) under: its own link,
/// or the HN permalink for self-posts.
pub fn effective_url(story: &Story) -> String {
    if story.url.is_empty() {
        hn::item_link(story.id)
    } else {
        story.url.clone()
    }
}

/// Cap a title at `MAX_TITLE_CHARS` characters, char-boundary safe.
pub fn truncate_title(title: &str) -> &str {
    match title.char_indices().nth(MAX_TITLE_CHARS) {
        Some((idx, _)) => &title[..idx],
        None => title,
    }
}

/// Compose the provenance comment citing the original author, age and
/// engagement of the story.
pub fn provenance_comment(story: &Story, now: chrono::DateTime<Utc>) -> String {
    format!(
        "This link was posted by [{by}]({user_link}) {when} on [HN]({item_link}). \
         It received {score} points and {comments} comments.",
        by = story.by,
        user_link = hn::user_link(&story.by),
        when = timefmt::ago(story.time, now),
        item_link = hn::item_link(story.id),
        score = story.score,
        comments = story.descendants,
    )
}

/// Cross-post one story to the destination platform.
///
/// Unless `skip_dupes` is set, an existing post for the effective URL
/// aborts with `Error::Dupes` before anything is submitted. Once the
/// link is posted there is no rollback: a failed provenance comment
/// surfaces as `Error::CommentFailed` carrying the committed item id.
/// The Discord mirror is best-effort and cannot fail the post.
pub async fn post_story(
    dest: &dyn Destination,
    chat: &dyn ChatSink,
    story: &Story,
    sub: &str,
    skip_dupes: bool,
) -> Result<u64> {
    let url = effective_url(story);

    if !skip_dupes {
        let dupes = dest.fetch_dupes(&url).await?;
        if !dupes.is_empty() {
            return Err(Error::Dupes { url, dupes });
        }
    }

    let title = truncate_title(&story.title);
    let item_id = dest.upsert_link(&url, title, sub).await?;
    info!(story_id = story.id, item_id, url = %url, "Cross-posted story");

    chat.send_embed(discord::post_embed(title, item_id)).await;

    let comment = provenance_comment(story, Utc::now());
    if let Err(e) = dest.create_comment(item_id, &comment).await {
        warn!(item_id, error = %e, "Post committed but provenance comment failed");
        return Err(Error::CommentFailed {
            item_id,
            source: Box::new(e),
        });
    }

    Ok(item_id)
}

/// Post a batch of already-selected stories, isolating failures.
///
/// Dupe conflicts are mirrored to Discord as structured embeds, other
/// errors as plain messages; neither stops the remaining items.
pub async fn post_batch(
    dest: &dyn Destination,
    chat: &dyn ChatSink,
    stories: &[Story],
    sub: &str,
) {
    for story in stories {
        match post_story(dest, chat, story, sub, false).await {
            Ok(item_id) => {
                info!(story_id = story.id, item_id, "Batch item posted");
            }
            Err(Error::Dupes { url, dupes }) => {
                warn!(story_id = story.id, url = %url, matches = dupes.len(), "Dupes found, skipping");
                chat.send_embed(discord::dupes_embed(&url, &dupes)).await;
            }
            Err(e) => {
                warn!(story_id = story.id, error = %e, "Batch item failed");
                chat.send_error(&format!("failed to cross-post story {}: {e}", story.id))
                    .await;
            }
        }
    }
}
