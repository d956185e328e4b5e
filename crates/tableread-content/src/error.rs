//! Error types for tableread-content

use thiserror::Error;

/// Generation failures. Callers surface these verbatim; there is no retry.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to generate transcription.")]
    Transcription,

    #[error("Failed to get script suggestion.")]
    Suggestion,

    #[error("Failed to generate storyboard image.")]
    Storyboard,

    #[error("Malformed response from content service: {0}")]
    MalformedResponse(String),
}

/// Result type alias for content operations
pub type Result<T> = std::result::Result<T, ContentError>;
