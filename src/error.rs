//! Preprocessing error types.

use thiserror::Error;

/// Errors raised while turning stdin into the processed book.
#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("failed to read or write the book")]
    Io(#[from] std::io::Error),

    #[error("input is not a `[context, book]` JSON array")]
    MalformedInput(#[source] serde_json::Error),

    #[error("unexpected shape in {location}")]
    ShapeMismatch {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize the book")]
    Serialize(#[source] serde_json::Error),
}
