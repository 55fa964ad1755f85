use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::NewAccount;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &PgRow) -> Result<Account, AccountError> {
        Ok(Account {
            id: AccountId(row.get("id")),
            username: Username::new(row.get("username"))?,
            email: EmailAddress::new(row.get("email"))?,
            password_hash: row.get("password_hash"),
            full_name: row.get("full_name"),
            reset_token: row.get("reset_token"),
            reset_token_expires_at: row.get("reset_token_expires_at"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    /// Map unique-index violations to the matching domain error.
    fn map_write_error(e: sqlx::Error, username: &str, email: &str) -> AccountError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                if db_err.constraint() == Some("users_username_key") {
                    return AccountError::UsernameTaken(username.to_string());
                }
                if db_err.constraint() == Some("users_email_key") {
                    return AccountError::EmailTaken(email.to_string());
                }
            }
        }
        AccountError::DatabaseError(e.to_string())
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<Account>, AccountError> {
        // `column` is always one of the fixed names below, never caller input
        let sql = format!(
            r#"
            SELECT id, username, email, password_hash, full_name, reset_token,
                   reset_token_expires_at, created_at, updated_at
            FROM users
            WHERE {} = $1 AND deleted_at IS NULL
            "#,
            column
        );

        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn exists(&self, column: &str, value: &str) -> Result<bool, AccountError> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM users WHERE {} = $1 AND deleted_at IS NULL)",
            column
        );

        sqlx::query_scalar::<_, bool>(&sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, full_name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, full_name, reset_token,
                      reset_token_expires_at, created_at, updated_at
            "#,
        )
        .bind(account.username.as_str())
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(&account.full_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            Self::map_write_error(e, account.username.as_str(), account.email.as_str())
        })?;

        Self::row_to_account(&row)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, full_name, reset_token,
                   reset_token_expires_at, created_at, updated_at
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError> {
        self.find_one("username", username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        self.find_one("email", email).await
    }

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<Account>, AccountError> {
        self.find_one("reset_token", token).await
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, AccountError> {
        self.exists("username", username).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AccountError> {
        self.exists("email", email).await
    }

    async fn update_profile(&self, account: Account) -> Result<Account, AccountError> {
        let row = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, full_name = $3, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, username, email, password_hash, full_name, reset_token,
                      reset_token_expires_at, created_at, updated_at
            "#,
        )
        .bind(account.id.0)
        .bind(account.email.as_str())
        .bind(&account.full_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            Self::map_write_error(e, account.username.as_str(), account.email.as_str())
        })?;

        match row {
            Some(r) => Self::row_to_account(&r),
            None => Err(AccountError::NotFound(account.id.to_string())),
        }
    }

    async fn save_reset_token(
        &self,
        id: AccountId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET reset_token = $2, reset_token_expires_at = $3, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn complete_password_reset(
        &self,
        id: AccountId,
        token: &str,
        password_hash: &str,
    ) -> Result<(), AccountError> {
        // Guarded on the token so two concurrent confirms cannot both succeed
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $3,
                reset_token = NULL,
                reset_token_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $1 AND reset_token = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .bind(token)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::ResetTokenNotFound);
        }

        Ok(())
    }

    async fn clear_reset_token(&self, id: AccountId) -> Result<(), AccountError> {
        sqlx::query(
            r#"
            UPDATE users
            SET reset_token = NULL, reset_token_expires_at = NULL, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
