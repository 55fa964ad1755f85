use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::errors::NotifierError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::LoginOutcome;
use crate::account::models::NewAccount;
use crate::account::models::Password;
use crate::account::models::RegisterCommand;
use crate::account::models::UpdateProfileCommand;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// Username uniqueness is checked before email uniqueness.
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `EmailTaken` - Email is already registered
    /// * `Credential` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError>;

    /// Verify credentials and issue a bearer token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password (indistinguishable)
    /// * `Credential` - Hash verification or token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AccountError>;

    /// Retrieve the caller's account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_profile(&self, id: AccountId) -> Result<Account, AccountError>;

    /// Apply a partial profile update.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `EmailTaken` - New email is held by another account
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        id: AccountId,
        command: UpdateProfileCommand,
    ) -> Result<Account, AccountError>;

    /// Issue a reset token for the account registered under `email` and
    /// send the reset link.
    ///
    /// # Errors
    /// * `NotFound` - No account uses this email
    /// * `DatabaseError` - Database operation failed
    async fn request_password_reset(&self, email: &EmailAddress) -> Result<(), AccountError>;

    /// Replace the password of the account holding `token`, consuming the token.
    ///
    /// # Errors
    /// * `ResetTokenNotFound` - No account holds this token (or it was already used)
    /// * `ResetTokenExpired` - Token expiry is missing or in the past
    /// * `Credential` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn reset_password(&self, token: &str, new_password: Password)
        -> Result<(), AccountError>;
}

/// Persistence operations for the account aggregate.
///
/// Every lookup ignores soft-deleted accounts.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account and return it with its assigned identifier.
    ///
    /// # Errors
    /// * `UsernameTaken` - Username unique constraint violated
    /// * `EmailTaken` - Email unique constraint violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;

    /// Retrieve account by identifier (None if absent or deleted).
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by username (None if absent or deleted).
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by email (None if absent or deleted).
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve the account currently holding a reset token.
    async fn find_by_reset_token(&self, token: &str) -> Result<Option<Account>, AccountError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, AccountError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, AccountError>;

    /// Persist email and full name changes.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `EmailTaken` - Email unique constraint violated
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(&self, account: Account) -> Result<Account, AccountError>;

    /// Store a reset token and its expiry on the account.
    async fn save_reset_token(
        &self,
        id: AccountId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AccountError>;

    /// Set a new password hash and clear the reset token in one write,
    /// provided the account still holds `token`.
    ///
    /// # Errors
    /// * `ResetTokenNotFound` - Token no longer held (consumed concurrently)
    /// * `DatabaseError` - Database operation failed
    async fn complete_password_reset(
        &self,
        id: AccountId,
        token: &str,
        password_hash: &str,
    ) -> Result<(), AccountError>;

    /// Drop a pending reset token without changing the password.
    async fn clear_reset_token(&self, id: AccountId) -> Result<(), AccountError>;
}

/// Delivery of password-reset links to account holders.
#[async_trait]
pub trait ResetNotifier: Send + Sync + 'static {
    /// Send `reset_link` to `email`.
    ///
    /// # Errors
    /// * `DeliveryFailed` - The link could not be delivered
    async fn send_reset_link(
        &self,
        email: &EmailAddress,
        reset_link: &str,
    ) -> Result<(), NotifierError>;
}
