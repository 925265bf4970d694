// Domain error taxonomy for the cross-posting pipeline.
//
// Callers branch on variants with exhaustive matching. In particular,
// `Dupes` is an expected, non-fatal outcome of a default post attempt
// and must never be lumped in with transport or remote failures.

use crate::sn::types::{ApiError, Dupe};

/// Errors produced by the platform clients and the cross-poster.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network, TLS or response-decoding failure reaching a remote API.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote API answered but reported structured errors.
    #[error("remote api error: {}", join_messages(.0))]
    Remote(Vec<ApiError>),

    /// The remote API answered with a body that fits no expected shape,
    /// e.g. an envelope carrying neither data nor errors. Decode-class:
    /// `Remote` stays reserved for a populated `errors` array.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// A post for this URL already exists on Stacker News. Expected and
    /// non-fatal: handled by notifying a human, never by retrying.
    #[error("found {} dupe(s) for {url}", .dupes.len())]
    Dupes { url: String, dupes: Vec<Dupe> },

    /// The post was committed but the provenance comment failed.
    /// Partial success: the caller must not retry the whole operation,
    /// that would duplicate the post.
    #[error("posted item {item_id} but failed to attach comment: {source}")]
    CommentFailed { item_id: u64, source: Box<Error> },
}

pub type Result<T> = std::result::Result<T, Error>;

fn join_messages(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
