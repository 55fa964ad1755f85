use thiserror::Error;

/// Credential hashing failures. A wrong password is not one of them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("could not hash credential: {0}")]
    Hashing(String),

    #[error("stored credential hash is unreadable: {0}")]
    MalformedHash(String),
}
