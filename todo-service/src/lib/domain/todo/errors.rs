use thiserror::Error;

/// Error for TodoId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoIdError {
    #[error("Invalid todo ID: {0}")]
    InvalidFormat(String),
}

/// Error for TodoTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoTitleError {
    #[error("Title is required")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all todo-related operations
#[derive(Debug, Clone, Error)]
pub enum TodoError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid todo ID: {0}")]
    InvalidTodoId(#[from] TodoIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TodoTitleError),

    #[error("invalid status value")]
    InvalidStatus(String),

    #[error("invalid priority value")]
    InvalidPriority(String),

    #[error("invalid date format, use YYYY-MM-DD")]
    InvalidDateFormat(String),

    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    // Domain-level errors
    #[error("todo not found")]
    NotFound(String),

    #[error("unauthorized access to todo")]
    Forbidden,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
