pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use errors::JwtError;
pub use handler::JwtHandler;

/// Fixed lifetime of an issued bearer token.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;
