use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::TodoData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;
use crate::todo::errors::TodoError;
use crate::todo::models::CreateTodoCommand;
use crate::todo::models::TodoTitle;

/// HTTP request body for creating a todo (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTodoRequest {
    title: String,
    #[serde(default)]
    description: String,
    status: String,
    priority: String,
    /// YYYY-MM-DD
    #[serde(default)]
    due_date: Option<String>,
}

impl CreateTodoRequest {
    fn try_into_command(self) -> Result<CreateTodoCommand, TodoError> {
        Ok(CreateTodoCommand {
            title: TodoTitle::new(self.title)?,
            description: self.description,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
        })
    }
}

pub async fn create_todo(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    ApiJson(body): ApiJson<CreateTodoRequest>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    state
        .todo_service
        .create_todo(caller.account_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| {
            ApiSuccess::new(
                StatusCode::CREATED,
                "Todo created successfully",
                todo.into(),
            )
        })
}
