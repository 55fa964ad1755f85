use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::AccountData;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::account::models::EmailAddress;
use crate::account::models::FullName;
use crate::account::models::UpdateProfileCommand;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating the caller's profile (raw JSON)
///
/// Omitted or empty fields keep their current value.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,
}

impl UpdateProfileRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, AccountError> {
        let email = self
            .email
            .filter(|email| !email.is_empty())
            .map(EmailAddress::new)
            .transpose()?;

        let full_name = self
            .full_name
            .filter(|name| !name.is_empty())
            .map(FullName::new)
            .transpose()?;

        Ok(UpdateProfileCommand { email, full_name })
    }
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    ApiJson(body): ApiJson<UpdateProfileRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .account_service
        .update_profile(caller.account_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref account| {
            ApiSuccess::new(StatusCode::OK, "Profile updated successfully", account.into())
        })
}
