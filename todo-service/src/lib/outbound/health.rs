use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum HealthError {
    #[error("database ping failed: {0}")]
    DatabaseUnreachable(String),
}

/// Liveness check of the backing store, used by the `/health` endpoint.
#[async_trait]
pub trait HealthCheck: Send + Sync + 'static {
    async fn ping(&self) -> Result<(), HealthError>;
}

pub struct PostgresHealthCheck {
    pool: PgPool,
}

impl PostgresHealthCheck {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthCheck for PostgresHealthCheck {
    async fn ping(&self) -> Result<(), HealthError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| HealthError::DatabaseUnreachable(e.to_string()))
    }
}
