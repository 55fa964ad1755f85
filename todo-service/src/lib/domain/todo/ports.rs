use async_trait::async_trait;

use crate::account::models::AccountId;
use crate::todo::errors::TodoError;
use crate::todo::models::CreateTodoCommand;
use crate::todo::models::ListTodosCommand;
use crate::todo::models::NewTodo;
use crate::todo::models::Pagination;
use crate::todo::models::Todo;
use crate::todo::models::TodoFilter;
use crate::todo::models::TodoId;
use crate::todo::models::TodoPage;
use crate::todo::models::UpdateTodoCommand;

/// Port for todo domain service operations.
///
/// Every operation acts on behalf of `caller`, the identity taken from a
/// validated bearer token.
#[async_trait]
pub trait TodoServicePort: Send + Sync + 'static {
    /// Create a todo owned by the caller.
    ///
    /// # Errors
    /// * `InvalidStatus` / `InvalidPriority` - Value outside the enumerated set
    /// * `InvalidDateFormat` - Due date is not YYYY-MM-DD
    /// * `DatabaseError` - Database operation failed
    async fn create_todo(
        &self,
        caller: AccountId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// Retrieve one of the caller's todos.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist or was deleted
    /// * `Forbidden` - Todo belongs to another account
    /// * `DatabaseError` - Database operation failed
    async fn get_todo(&self, id: TodoId, caller: AccountId) -> Result<Todo, TodoError>;

    /// List the caller's todos, newest first.
    ///
    /// # Errors
    /// * `InvalidStatus` / `InvalidPriority` - Filter outside the enumerated set
    /// * `InvalidPagination` - Page or limit out of range
    /// * `DatabaseError` - Database operation failed
    async fn list_todos(
        &self,
        caller: AccountId,
        command: ListTodosCommand,
    ) -> Result<TodoPage, TodoError>;

    /// Apply a partial update to one of the caller's todos.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist or was deleted
    /// * `Forbidden` - Todo belongs to another account
    /// * `InvalidStatus` / `InvalidPriority` / `InvalidDateFormat` - Bad new value
    /// * `DatabaseError` - Database operation failed
    async fn update_todo(
        &self,
        id: TodoId,
        caller: AccountId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// Soft-delete one of the caller's todos.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist or was deleted
    /// * `Forbidden` - Todo belongs to another account
    /// * `DatabaseError` - Database operation failed
    async fn delete_todo(&self, id: TodoId, caller: AccountId) -> Result<(), TodoError>;
}

/// Persistence operations for todo items.
///
/// Soft-deleted rows are invisible to every operation.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError>;

    /// Retrieve a todo regardless of owner (None if absent or deleted).
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoError>;

    /// Owner's todos matching `filter`, newest-created first, optionally one page.
    async fn list_by_owner(
        &self,
        owner_id: AccountId,
        filter: TodoFilter,
        pagination: Option<Pagination>,
    ) -> Result<Vec<Todo>, TodoError>;

    /// Number of owner's todos matching `filter`.
    async fn count_by_owner(
        &self,
        owner_id: AccountId,
        filter: TodoFilter,
    ) -> Result<i64, TodoError>;

    /// Persist all mutable fields and return the stored row.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist or was deleted
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// Tombstone the todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist or was already deleted
    /// * `DatabaseError` - Database operation failed
    async fn soft_delete(&self, id: TodoId) -> Result<(), TodoError>;
}
