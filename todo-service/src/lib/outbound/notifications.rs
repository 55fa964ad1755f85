use async_trait::async_trait;

use crate::account::errors::NotifierError;
use crate::account::models::EmailAddress;
use crate::account::ports::ResetNotifier;

/// Reset notifier that writes the link to the service log instead of
/// sending mail.
#[derive(Debug, Default, Clone)]
pub struct LogResetNotifier;

impl LogResetNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResetNotifier for LogResetNotifier {
    async fn send_reset_link(
        &self,
        email: &EmailAddress,
        reset_link: &str,
    ) -> Result<(), NotifierError> {
        tracing::info!(email = %email, reset_link = %reset_link, "Password reset link issued");
        Ok(())
    }
}
