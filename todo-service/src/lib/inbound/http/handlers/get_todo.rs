use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::TodoData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;
use crate::todo::errors::TodoError;
use crate::todo::models::TodoId;

pub async fn get_todo(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let todo_id = TodoId::from_string(&id).map_err(TodoError::from)?;

    state
        .todo_service
        .get_todo(todo_id, caller.account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| {
            ApiSuccess::new(
                StatusCode::OK,
                "Todo retrieved successfully",
                todo.into(),
            )
        })
}
