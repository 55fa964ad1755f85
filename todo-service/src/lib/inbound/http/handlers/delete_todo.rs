use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiMessage;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;
use crate::todo::errors::TodoError;
use crate::todo::models::TodoId;

pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
) -> Result<ApiMessage, ApiError> {
    let todo_id = TodoId::from_string(&id).map_err(TodoError::from)?;

    state
        .todo_service
        .delete_todo(todo_id, caller.account_id)
        .await?;

    Ok(ApiMessage::message(StatusCode::OK, "Todo deleted successfully"))
}
