use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

/// Entropy of a password-reset token, in bytes (256 bits).
pub const RESET_TOKEN_BYTES: usize = 32;

/// How long a password-reset token stays usable after issuance.
pub const RESET_TOKEN_LIFETIME_MINUTES: i64 = 60;

/// Generate an unguessable, URL-safe password-reset token.
///
/// 32 bytes from the operating system RNG, base64url-encoded without
/// padding so the token can be embedded in a query string as-is.
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
