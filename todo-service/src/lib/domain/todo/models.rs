use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use crate::account::models::AccountId;
use crate::todo::errors::TodoError;
use crate::todo::errors::TodoIdError;
use crate::todo::errors::TodoTitleError;

/// Calendar format accepted for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Todo aggregate entity.
///
/// Only non-deleted items are ever materialized; soft-deleted rows stay in
/// the store but never leave the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: String,
    pub status: TodoStatus,
    pub priority: TodoPriority,
    pub due_date: Option<NaiveDate>,
    pub owner_id: AccountId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    pub fn is_owned_by(&self, account_id: AccountId) -> bool {
        self.owner_id == account_id
    }
}

/// Todo fields known before the store assigns an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub title: TodoTitle,
    pub description: String,
    pub status: TodoStatus,
    pub priority: TodoPriority,
    pub due_date: Option<NaiveDate>,
    pub owner_id: AccountId,
}

/// Todo surrogate identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(pub i64);

impl TodoId {
    /// Parse a todo ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, TodoIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(TodoId(id)),
            _ => Err(TodoIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Todo title value type
///
/// Ensures the title is present and at most 200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    const MAX_LENGTH: usize = 200;

    /// # Errors
    /// * `Empty` - Title is blank
    /// * `TooLong` - Title longer than 200 characters
    pub fn new(title: String) -> Result<Self, TodoTitleError> {
        if title.trim().is_empty() {
            return Err(TodoTitleError::Empty);
        }

        let length = title.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(TodoTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Workflow state of a todo item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoStatus {
    Pending,
    InProgress,
    Completed,
}

impl TodoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Pending => "pending",
            TodoStatus::InProgress => "in_progress",
            TodoStatus::Completed => "completed",
        }
    }
}

impl FromStr for TodoStatus {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TodoStatus::Pending),
            "in_progress" => Ok(TodoStatus::InProgress),
            "completed" => Ok(TodoStatus::Completed),
            other => Err(TodoError::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative importance of a todo item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoPriority {
    Low,
    Medium,
    High,
}

impl TodoPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoPriority::Low => "low",
            TodoPriority::Medium => "medium",
            TodoPriority::High => "high",
        }
    }
}

impl FromStr for TodoPriority {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TodoPriority::Low),
            "medium" => Ok(TodoPriority::Medium),
            "high" => Ok(TodoPriority::High),
            other => Err(TodoError::InvalidPriority(other.to_string())),
        }
    }
}

impl fmt::Display for TodoPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
///
/// # Errors
/// * `InvalidDateFormat` - Not a well-formed calendar date
pub fn parse_due_date(value: &str) -> Result<NaiveDate, TodoError> {
    // chrono alone accepts unpadded fields and a leading sign
    if !has_date_shape(value) {
        return Err(TodoError::InvalidDateFormat(value.to_string()));
    }

    NaiveDate::parse_from_str(value, DUE_DATE_FORMAT)
        .map_err(|_| TodoError::InvalidDateFormat(value.to_string()))
}

fn has_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Three-state change for a field in a partial update.
///
/// Separates "not provided" from "explicitly cleared".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    #[default]
    Unchanged,
    Clear,
    Set(T),
}

/// Command to create a todo.
///
/// Status, priority and due date arrive as raw text and are validated by the service.
#[derive(Debug, Clone)]
pub struct CreateTodoCommand {
    pub title: TodoTitle,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub due_date: Option<String>,
}

/// Command to partially update a todo.
///
/// `None` leaves a field unchanged. `description` cleared means empty text;
/// `due_date` set to an empty string also clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateTodoCommand {
    pub title: Option<TodoTitle>,
    pub description: FieldUpdate<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: FieldUpdate<String>,
}

/// Raw listing request: optional filters and optional pagination.
#[derive(Debug, Clone, Default)]
pub struct ListTodosCommand {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Validated listing filters handed to the repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub status: Option<TodoStatus>,
    pub priority: Option<TodoPriority>,
}

/// One page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: u32,
}

impl Pagination {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    /// # Errors
    /// * `InvalidPagination` - page below 1, or limit outside 1-100
    pub fn new(page: u32, limit: u32) -> Result<Self, TodoError> {
        if page < 1 {
            return Err(TodoError::InvalidPagination(
                "page must be at least 1".to_string(),
            ));
        }
        if limit < 1 || limit > Self::MAX_LIMIT {
            return Err(TodoError::InvalidPagination(format!(
                "limit must be between 1 and {}",
                Self::MAX_LIMIT
            )));
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }
}

/// Listing result, newest-created first.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoPage {
    pub todos: Vec<Todo>,
    pub total_count: i64,
    pub pagination: Option<Pagination>,
}
