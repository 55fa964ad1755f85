use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Deserializer;
use thiserror::Error;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::TodoData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;
use crate::todo::errors::TodoError;
use crate::todo::errors::TodoTitleError;
use crate::todo::models::FieldUpdate;
use crate::todo::models::TodoId;
use crate::todo::models::TodoTitle;
use crate::todo::models::UpdateTodoCommand;

/// HTTP request body for a partial todo update (raw JSON)
///
/// The outer `Option` records whether the key was present at all, the inner
/// one whether it was `null`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub status: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub priority: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub due_date: Option<Option<String>>,
}

/// Wraps any present value (including `null`) in `Some`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Error)]
enum ParseUpdateTodoRequestError {
    #[error("Invalid title: {0}")]
    Title(#[from] TodoTitleError),

    #[error("{0} cannot be null")]
    NullField(&'static str),
}

impl From<ParseUpdateTodoRequestError> for ApiError {
    fn from(err: ParseUpdateTodoRequestError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

fn required(
    name: &'static str,
    value: Option<Option<String>>,
) -> Result<Option<String>, ParseUpdateTodoRequestError> {
    match value {
        None => Ok(None),
        Some(None) => Err(ParseUpdateTodoRequestError::NullField(name)),
        Some(Some(v)) => Ok(Some(v)),
    }
}

fn nullable(value: Option<Option<String>>) -> FieldUpdate<String> {
    match value {
        None => FieldUpdate::Unchanged,
        Some(None) => FieldUpdate::Clear,
        Some(Some(v)) => FieldUpdate::Set(v),
    }
}

impl UpdateTodoRequest {
    fn try_into_command(self) -> Result<UpdateTodoCommand, ParseUpdateTodoRequestError> {
        let title = required("title", self.title)?
            .map(TodoTitle::new)
            .transpose()?;

        Ok(UpdateTodoCommand {
            title,
            description: nullable(self.description),
            status: required("status", self.status)?,
            priority: required("priority", self.priority)?,
            due_date: nullable(self.due_date),
        })
    }
}

pub async fn update_todo(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateTodoRequest>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let todo_id = TodoId::from_string(&id).map_err(TodoError::from)?;
    let command = body.try_into_command()?;

    state
        .todo_service
        .update_todo(todo_id, caller.account_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| {
            ApiSuccess::new(
                StatusCode::OK,
                "Todo updated successfully",
                todo.into(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> UpdateTodoRequest {
        serde_json::from_str(json).expect("valid update body")
    }

    #[test]
    fn test_absent_null_and_value_are_distinct() {
        let absent = parse("{}");
        assert_eq!(absent.due_date, None);

        let null = parse(r#"{"due_date": null}"#);
        assert_eq!(null.due_date, Some(None));

        let value = parse(r#"{"due_date": "2025-01-15"}"#);
        assert_eq!(value.due_date, Some(Some("2025-01-15".to_string())));
    }

    #[test]
    fn test_command_from_partial_body() {
        let command = parse(r#"{"status": "completed", "description": null, "due_date": ""}"#)
            .try_into_command()
            .unwrap();

        assert!(command.title.is_none());
        assert_eq!(command.status.as_deref(), Some("completed"));
        assert_eq!(command.priority, None);
        assert_eq!(command.description, FieldUpdate::Clear);
        assert_eq!(command.due_date, FieldUpdate::Set(String::new()));
    }

    #[test]
    fn test_null_required_field_is_rejected() {
        let result = parse(r#"{"title": null}"#).try_into_command();
        assert!(matches!(
            result,
            Err(ParseUpdateTodoRequestError::NullField("title"))
        ));

        let result = parse(r#"{"priority": null}"#).try_into_command();
        assert!(matches!(
            result,
            Err(ParseUpdateTodoRequestError::NullField("priority"))
        ));
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let result = parse(r#"{"title": ""}"#).try_into_command();
        assert!(matches!(
            result,
            Err(ParseUpdateTodoRequestError::Title(TodoTitleError::Empty))
        ));
    }
}
