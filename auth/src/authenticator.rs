use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TOKEN_LIFETIME_HOURS;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::reset::generate_reset_token;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Built once at startup from the process-wide signing secret and shared
/// (behind an `Arc`) by every consumer.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash could not be parsed
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a bearer token for the account.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `account_id` - Identifier placed in the token claims
    /// * `username` - Username placed in the token claims
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        account_id: i64,
        username: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(account_id, username)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a bearer token valid for [`TOKEN_LIFETIME_HOURS`].
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, account_id: i64, username: &str) -> Result<String, JwtError> {
        let claims = Claims::for_account(account_id, username, TOKEN_LIFETIME_HOURS);
        self.jwt_handler.encode(&claims)
    }

    /// Validate and decode a bearer token.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed, badly signed, wrong algorithm or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }

    /// Generate a single-use password-reset token.
    pub fn generate_reset_token(&self) -> String {
        generate_reset_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(SECRET);

        // Hash a password
        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        // Authenticate with correct password
        let result = authenticator
            .authenticate(password, &hash, 123, "alice")
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());

        // Validate the token
        let decoded = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded.account_id, 123);
        assert_eq!(decoded.username, "alice");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new(SECRET);

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        // Try with wrong password
        let result = authenticator.authenticate("wrong_password", &hash, 123, "alice");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_issued_token_lifetime() {
        let authenticator = Authenticator::new(SECRET);

        let token = authenticator
            .issue_token(5, "carol")
            .expect("Failed to issue token");
        let claims = authenticator
            .validate_token(&token)
            .expect("Failed to validate token");

        assert_eq!(claims.exp - claims.iat, TOKEN_LIFETIME_HOURS * 60 * 60);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let issuer = Authenticator::new(b"another_secret_key_at_least_32_bytes");
        let validator = Authenticator::new(SECRET);

        let token = issuer.issue_token(1, "alice").unwrap();
        assert!(matches!(
            validator.validate_token(&token),
            Err(JwtError::InvalidToken)
        ));
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::new(SECRET);

        let result = authenticator.validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
