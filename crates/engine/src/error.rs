//! Content parsing errors.
//!
//! These never escape a render pass: the composer records them against the
//! offending block or section and the dispatcher turns them into diagnostics.

use thiserror::Error;

/// Errors raised while turning a stored value into a typed block or section.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("expected a JSON object")]
    NotAnObject,

    #[error("missing `_type` tag")]
    MissingTag,

    #[error("unknown block type '{0}'")]
    UnknownTag(String),

    #[error("malformed '{tag}' value: {source}")]
    Malformed {
        tag: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias using ContentError.
pub type ContentResult<T> = Result<T, ContentError>;
