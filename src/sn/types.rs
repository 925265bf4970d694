// Wire types for the Stacker News GraphQL API.
//
// Item and comment ids arrive as JSON strings ("1234"), hence the
// `id_string` deserializer on every id field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// A structured error from the GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    pub message: String,
}

/// Generic GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GqlResponse<T> {
    #[serde(default)]
    pub errors: Vec<ApiError>,
    pub data: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub name: String,
}

/// An existing post matching a dupes query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Dupe {
    #[serde(deserialize_with = "id_string")]
    pub id: u64,
    pub url: String,
    pub title: String,
    pub user: User,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub sats: i64,
    pub ncomments: i64,
}

/// A comment node; replies nest under `comments`.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    #[serde(deserialize_with = "id_string")]
    pub id: u64,
    #[serde(default)]
    pub text: String,
    pub user: Option<User>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A full Stacker News item, as returned by item queries and mutations.
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    #[serde(deserialize_with = "id_string")]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub sats: i64,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ncomments: i64,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

// -- Query/mutation payload shapes --

#[derive(Debug, Deserialize)]
pub struct DupesData {
    pub dupes: Vec<Dupe>,
}

#[derive(Debug, Deserialize)]
pub struct UpsertLinkData {
    #[serde(rename = "upsertLink")]
    pub upsert_link: Item,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentData {
    #[serde(rename = "createComment")]
    pub create_comment: Comment,
}

#[derive(Debug, Deserialize)]
pub struct HasNewNotesData {
    #[serde(rename = "hasNewNotes")]
    pub has_new_notes: bool,
}

/// Deserialize a string-encoded integer id ("1234" -> 1234).
fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}
