use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiQuery;
use super::ApiSuccess;
use super::TodoData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;
use crate::todo::errors::TodoError;
use crate::todo::models::ListTodosCommand;
use crate::todo::models::TodoPage;

/// Query string for listing todos. Empty values count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct ListTodosQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_number(name: &str, value: Option<String>) -> Result<Option<u32>, TodoError> {
    non_empty(value)
        .map(|v| {
            v.parse::<u32>().map_err(|_| {
                TodoError::InvalidPagination(format!("{} must be a positive integer", name))
            })
        })
        .transpose()
}

impl ListTodosQuery {
    fn try_into_command(self) -> Result<ListTodosCommand, TodoError> {
        Ok(ListTodosCommand {
            status: non_empty(self.status),
            priority: non_empty(self.priority),
            page: parse_number("page", self.page)?,
            limit: parse_number("limit", self.limit)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoListData {
    pub todos: Vec<TodoData>,
    pub total_count: i64,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl From<&TodoPage> for TodoListData {
    fn from(page: &TodoPage) -> Self {
        Self {
            todos: page.todos.iter().map(TodoData::from).collect(),
            total_count: page.total_count,
            page: page.pagination.map(|p| p.page()),
            limit: page.pagination.map(|p| p.limit()),
        }
    }
}

pub async fn list_todos(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    ApiQuery(query): ApiQuery<ListTodosQuery>,
) -> Result<ApiSuccess<TodoListData>, ApiError> {
    state
        .todo_service
        .list_todos(caller.account_id, query.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref page| {
            ApiSuccess::new(
                StatusCode::OK,
                "Todos retrieved successfully",
                page.into(),
            )
        })
}
