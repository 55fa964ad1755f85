use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::AccountData;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// HTTP request body for logging in (raw JSON)
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub user: AccountData,
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    if body.username.is_empty() || body.password.is_empty() {
        return Err(ApiError::InvalidInput(
            "username and password are required".to_string(),
        ));
    }

    let outcome = state
        .account_service
        .login(&body.username, &body.password)
        .await?;

    tracing::info!(account_id = %outcome.account.id, "Login successful");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        "Login successful",
        LoginResponseData {
            token: outcome.token,
            user: AccountData::from(&outcome.account),
        },
    ))
}
