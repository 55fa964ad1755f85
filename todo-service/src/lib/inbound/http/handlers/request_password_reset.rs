use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use super::ApiMessage;
use crate::account::errors::AccountError;
use crate::account::models::EmailAddress;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct RequestPasswordResetRequest {
    pub email: String,
}

pub async fn request_password_reset(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RequestPasswordResetRequest>,
) -> Result<ApiMessage, ApiError> {
    let email = EmailAddress::new(body.email).map_err(AccountError::from)?;

    state.account_service.request_password_reset(&email).await?;

    Ok(ApiMessage::message(
        StatusCode::OK,
        "If the email exists, a reset link was sent",
    ))
}
