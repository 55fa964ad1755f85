//! Credential hashing for stored account passwords.

mod argon2;
mod errors;

pub use self::argon2::PasswordHasher;
pub use self::errors::PasswordError;
