use thiserror::Error;

/// Error type for JWT operations.
///
/// Validation failures are deliberately collapsed into a single variant:
/// callers cannot tell a bad signature from an expired or malformed token.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("invalid or expired token")]
    InvalidToken,
}
