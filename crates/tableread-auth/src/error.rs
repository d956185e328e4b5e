//! Error types for tableread-auth

use thiserror::Error;

/// Token validation failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is not recognized")]
    Unknown,

    #[error("Token has expired")]
    Expired,
}

/// Result type alias for token operations
pub type Result<T> = std::result::Result<T, TokenError>;
