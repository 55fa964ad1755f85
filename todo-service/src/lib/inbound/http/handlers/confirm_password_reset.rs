use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use super::ApiMessage;
use crate::account::errors::AccountError;
use crate::account::models::Password;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct ConfirmPasswordResetRequest {
    pub token: String,
    pub new_password: String,
}

pub async fn confirm_password_reset(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ConfirmPasswordResetRequest>,
) -> Result<ApiMessage, ApiError> {
    if body.token.is_empty() {
        return Err(ApiError::InvalidInput("token is required".to_string()));
    }
    let new_password = Password::new(body.new_password).map_err(AccountError::from)?;

    state
        .account_service
        .reset_password(&body.token, new_password)
        .await?;

    Ok(ApiMessage::message(StatusCode::OK, "Password reset successful"))
}
