use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Duration;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::LoginOutcome;
use crate::account::models::NewAccount;
use crate::account::models::Password;
use crate::account::models::RegisterCommand;
use crate::account::models::UpdateProfileCommand;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::account::ports::ResetNotifier;

/// Path of the reset-confirm endpoint, appended to the public base URL.
const RESET_CONFIRM_PATH: &str = "/api/v1/auth/reset-password/confirm";

/// Domain service implementation for account and authentication operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<AR, RN>
where
    AR: AccountRepository,
    RN: ResetNotifier,
{
    repository: Arc<AR>,
    notifier: Arc<RN>,
    authenticator: Arc<Authenticator>,
    public_url: String,
}

impl<AR, RN> AccountService<AR, RN>
where
    AR: AccountRepository,
    RN: ResetNotifier,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `notifier` - Reset-link delivery implementation
    /// * `authenticator` - Password hashing and token issuance
    /// * `public_url` - Base URL embedded in password-reset links
    pub fn new(
        repository: Arc<AR>,
        notifier: Arc<RN>,
        authenticator: Arc<Authenticator>,
        public_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            notifier,
            authenticator,
            public_url: public_url.into(),
        }
    }

    fn reset_link(&self, token: &str) -> String {
        format!(
            "{}{}?token={}",
            self.public_url.trim_end_matches('/'),
            RESET_CONFIRM_PATH,
            token
        )
    }

    async fn find_existing(&self, id: AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<AR, RN> AccountServicePort for AccountService<AR, RN>
where
    AR: AccountRepository,
    RN: ResetNotifier,
{
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError> {
        let username = command.username.as_str();
        if self.repository.exists_by_username(username).await? {
            return Err(AccountError::UsernameTaken(username.to_string()));
        }

        let email = command.email.as_str();
        if self.repository.exists_by_email(email).await? {
            return Err(AccountError::EmailTaken(email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())?;

        // A concurrent registration can still win between the checks and the
        // insert; the store's unique indexes turn that into UsernameTaken/EmailTaken.
        let account = self
            .repository
            .create(NewAccount {
                username: command.username,
                email: command.email,
                password_hash,
                full_name: command.full_name.into_inner(),
            })
            .await?;

        tracing::info!(account_id = %account.id, username = %account.username, "Account registered");

        Ok(account)
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AccountError> {
        let account = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let result = self
            .authenticator
            .authenticate(
                password,
                &account.password_hash,
                account.id.0,
                account.username.as_str(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AccountError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => AccountError::from(err),
                AuthenticationError::JwtError(err) => AccountError::from(err),
            })?;

        Ok(LoginOutcome {
            token: result.access_token,
            account,
        })
    }

    async fn get_profile(&self, id: AccountId) -> Result<Account, AccountError> {
        self.find_existing(id).await
    }

    async fn update_profile(
        &self,
        id: AccountId,
        command: UpdateProfileCommand,
    ) -> Result<Account, AccountError> {
        let mut account = self.find_existing(id).await?;

        if let Some(new_email) = command.email {
            if new_email != account.email {
                if let Some(holder) = self.repository.find_by_email(new_email.as_str()).await? {
                    if holder.id != id {
                        return Err(AccountError::EmailTaken(new_email.as_str().to_string()));
                    }
                }
                account.email = new_email;
            }
        }

        if let Some(new_full_name) = command.full_name {
            account.full_name = new_full_name.into_inner();
        }

        self.repository.update_profile(account).await
    }

    async fn request_password_reset(&self, email: &EmailAddress) -> Result<(), AccountError> {
        // Unknown emails surface as NotFound, which does reveal whether an
        // account exists for the address.
        let account = self
            .repository
            .find_by_email(email.as_str())
            .await?
            .ok_or(AccountError::NotFound(email.as_str().to_string()))?;

        let token = self.authenticator.generate_reset_token();
        let expires_at = Utc::now() + Duration::minutes(auth::RESET_TOKEN_LIFETIME_MINUTES);

        self.repository
            .save_reset_token(account.id, &token, expires_at)
            .await?;

        let reset_link = self.reset_link(&token);
        if let Err(e) = self
            .notifier
            .send_reset_link(&account.email, &reset_link)
            .await
        {
            tracing::error!(
                "Failed to send reset link for account {}: {}",
                account.id,
                e
            );
        }

        Ok(())
    }

    async fn reset_password(
        &self,
        token: &str,
        new_password: Password,
    ) -> Result<(), AccountError> {
        let account = self
            .repository
            .find_by_reset_token(token)
            .await?
            .ok_or(AccountError::ResetTokenNotFound)?;

        if account.reset_token_expired(Utc::now()) {
            self.repository.clear_reset_token(account.id).await?;
            return Err(AccountError::ResetTokenExpired);
        }

        let password_hash = self.authenticator.hash_password(new_password.as_str())?;

        self.repository
            .complete_password_reset(account.id, token, &password_hash)
            .await?;

        tracing::info!(account_id = %account.id, "Password reset completed");

        Ok(())
    }
}
