use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity claims carried by a bearer token.
///
/// `iat` and `exp` use the registered RFC 7519 names so the JWT library
/// can enforce expiry; `account_id` and `username` identify the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Account identifier
    pub account_id: i64,

    /// Username at issuance time
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an account, issued now and expiring after
    /// `lifetime_hours`.
    ///
    /// # Arguments
    /// * `account_id` - Account identifier
    /// * `username` - Account username
    /// * `lifetime_hours` - Hours until token expires
    pub fn for_account(account_id: i64, username: impl Into<String>, lifetime_hours: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(lifetime_hours);

        Self {
            account_id,
            username: username.into(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = iat;
        self
    }
}
