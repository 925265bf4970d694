// Shared mock collaborators for the orchestrator tests.
//
// MockDest records every call and can be seeded with dupes per URL or
// forced failures; MockChat collects delivered embeds and error
// messages. Both are pure in-memory stand-ins, no network anywhere.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use kindling::discord::{ChatSink, Embed};
use kindling::error::{Error, Result};
use kindling::hn::Story;
use kindling::sn::types::{ApiError, Dupe, User};
use kindling::sn::Destination;

/// A recorded call against the destination platform.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchDupes { url: String },
    UpsertLink { url: String, title: String, sub: String },
    CreateComment { parent_id: u64, text: String },
    HasNewNotes,
    RefreshSession,
}

#[derive(Default)]
pub struct MockDest {
    /// Dupes returned for a given URL; unknown URLs return no matches.
    pub dupes_for: HashMap<String, Vec<Dupe>>,
    /// Fail every createComment call with a remote error.
    pub fail_comments: bool,
    /// Scripted hasNewNotes results, consumed front to back.
    /// `None` entries simulate a fetch failure.
    pub notes_script: Mutex<Vec<Option<bool>>>,
    /// Scripted refreshSession outcomes, consumed front to back.
    /// `false` entries fail; an exhausted script succeeds.
    pub refresh_script: Mutex<Vec<bool>>,
    pub next_item_id: AtomicU64,
    pub calls: Mutex<Vec<Call>>,
}

impl MockDest {
    pub fn new() -> Self {
        Self {
            next_item_id: AtomicU64::new(100),
            ..Self::default()
        }
    }

    pub fn with_dupes(url: &str, dupes: Vec<Dupe>) -> Self {
        let mut mock = Self::new();
        mock.dupes_for.insert(url.to_string(), dupes);
        mock
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn remote_error(message: &str) -> Error {
        Error::Remote(vec![ApiError {
            message: message.to_string(),
        }])
    }
}

#[async_trait]
impl Destination for MockDest {
    async fn fetch_dupes(&self, url: &str) -> Result<Vec<Dupe>> {
        self.record(Call::FetchDupes {
            url: url.to_string(),
        });
        Ok(self.dupes_for.get(url).cloned().unwrap_or_default())
    }

    async fn upsert_link(&self, url: &str, title: &str, sub: &str) -> Result<u64> {
        self.record(Call::UpsertLink {
            url: url.to_string(),
            title: title.to_string(),
            sub: sub.to_string(),
        });
        Ok(self.next_item_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn create_comment(&self, parent_id: u64, text: &str) -> Result<u64> {
        self.record(Call::CreateComment {
            parent_id,
            text: text.to_string(),
        });
        if self.fail_comments {
            return Err(Self::remote_error("comment rejected"));
        }
        Ok(parent_id + 1_000_000)
    }

    async fn has_new_notes(&self) -> Result<bool> {
        self.record(Call::HasNewNotes);
        let mut script = self.notes_script.lock().unwrap();
        if script.is_empty() {
            return Ok(false);
        }
        match script.remove(0) {
            Some(flag) => Ok(flag),
            None => Err(Self::remote_error("notes fetch failed")),
        }
    }

    async fn refresh_session(&self) -> Result<()> {
        self.record(Call::RefreshSession);
        let mut script = self.refresh_script.lock().unwrap();
        if script.is_empty() || script.remove(0) {
            Ok(())
        } else {
            Err(Self::remote_error("session refresh failed"))
        }
    }
}

#[derive(Default)]
pub struct MockChat {
    pub embeds: Mutex<Vec<Embed>>,
    pub errors: Mutex<Vec<String>>,
}

impl MockChat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn embed_titles(&self) -> Vec<String> {
        self.embeds
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.title.clone())
            .collect()
    }
}

#[async_trait]
impl ChatSink for MockChat {
    async fn send_embed(&self, embed: Embed) {
        self.embeds.lock().unwrap().push(embed);
    }

    async fn send_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

// -- Fixtures --

pub fn story(id: u64, url: &str, title: &str) -> Story {
    Story {
        id,
        by: "pg".to_string(),
        time: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        descendants: 7,
        kids: vec![1, 2, 3],
        score: 42,
        title: title.to_string(),
        url: url.to_string(),
    }
}

pub fn dupe(id: u64, url: &str) -> Dupe {
    Dupe {
        id,
        url: url.to_string(),
        title: format!("existing post {id}"),
        user: User {
            name: "k00b".to_string(),
        },
        created_at: Utc.with_ymd_and_hms(2024, 2, 28, 9, 30, 0).unwrap(),
        sats: 21,
        ncomments: 4,
    }
}
