use std::sync::Arc;

use async_trait::async_trait;

use crate::account::models::AccountId;
use crate::todo::errors::TodoError;
use crate::todo::models::parse_due_date;
use crate::todo::models::CreateTodoCommand;
use crate::todo::models::FieldUpdate;
use crate::todo::models::ListTodosCommand;
use crate::todo::models::NewTodo;
use crate::todo::models::Pagination;
use crate::todo::models::Todo;
use crate::todo::models::TodoFilter;
use crate::todo::models::TodoId;
use crate::todo::models::TodoPage;
use crate::todo::models::TodoPriority;
use crate::todo::models::TodoStatus;
use crate::todo::models::UpdateTodoCommand;
use crate::todo::ports::TodoRepository;
use crate::todo::ports::TodoServicePort;

/// Domain service implementation for todo operations.
///
/// Ownership is enforced here: a todo is only visible or mutable through
/// the account that created it.
pub struct TodoService<TR>
where
    TR: TodoRepository,
{
    repository: Arc<TR>,
}

impl<TR> TodoService<TR>
where
    TR: TodoRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }

    /// Load a todo and check it belongs to `caller`.
    async fn find_owned(&self, id: TodoId, caller: AccountId) -> Result<Todo, TodoError> {
        let todo = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TodoError::NotFound(id.to_string()))?;

        if !todo.is_owned_by(caller) {
            tracing::warn!(todo_id = %id, caller = %caller, "Rejected access to foreign todo");
            return Err(TodoError::Forbidden);
        }

        Ok(todo)
    }
}

fn pagination_for(page: Option<u32>, limit: Option<u32>) -> Result<Option<Pagination>, TodoError> {
    match (page, limit) {
        (None, None) => Ok(None),
        (page, limit) => Pagination::new(
            page.unwrap_or(Pagination::DEFAULT_PAGE),
            limit.unwrap_or(Pagination::DEFAULT_LIMIT),
        )
        .map(Some),
    }
}

#[async_trait]
impl<TR> TodoServicePort for TodoService<TR>
where
    TR: TodoRepository,
{
    async fn create_todo(
        &self,
        caller: AccountId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let status: TodoStatus = command.status.parse()?;
        let priority: TodoPriority = command.priority.parse()?;
        let due_date = command
            .due_date
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(parse_due_date)
            .transpose()?;

        let todo = self
            .repository
            .create(NewTodo {
                title: command.title,
                description: command.description,
                status,
                priority,
                due_date,
                owner_id: caller,
            })
            .await?;

        tracing::debug!(todo_id = %todo.id, owner = %caller, "Todo created");

        Ok(todo)
    }

    async fn get_todo(&self, id: TodoId, caller: AccountId) -> Result<Todo, TodoError> {
        self.find_owned(id, caller).await
    }

    async fn list_todos(
        &self,
        caller: AccountId,
        command: ListTodosCommand,
    ) -> Result<TodoPage, TodoError> {
        let filter = TodoFilter {
            status: command
                .status
                .as_deref()
                .map(str::parse::<TodoStatus>)
                .transpose()?,
            priority: command
                .priority
                .as_deref()
                .map(str::parse::<TodoPriority>)
                .transpose()?,
        };
        let pagination = pagination_for(command.page, command.limit)?;

        let todos = self
            .repository
            .list_by_owner(caller, filter, pagination)
            .await?;

        let total_count = match pagination {
            Some(_) => self.repository.count_by_owner(caller, filter).await?,
            None => todos.len() as i64,
        };

        Ok(TodoPage {
            todos,
            total_count,
            pagination,
        })
    }

    async fn update_todo(
        &self,
        id: TodoId,
        caller: AccountId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let mut todo = self.find_owned(id, caller).await?;

        if let Some(title) = command.title {
            todo.title = title.into_inner();
        }

        match command.description {
            FieldUpdate::Unchanged => {}
            FieldUpdate::Clear => todo.description.clear(),
            FieldUpdate::Set(description) => todo.description = description,
        }

        if let Some(status) = command.status {
            todo.status = status.parse()?;
        }

        if let Some(priority) = command.priority {
            todo.priority = priority.parse()?;
        }

        match command.due_date {
            FieldUpdate::Unchanged => {}
            FieldUpdate::Clear => todo.due_date = None,
            FieldUpdate::Set(value) if value.is_empty() => todo.due_date = None,
            FieldUpdate::Set(value) => todo.due_date = Some(parse_due_date(&value)?),
        }

        self.repository.update(todo).await
    }

    async fn delete_todo(&self, id: TodoId, caller: AccountId) -> Result<(), TodoError> {
        self.find_owned(id, caller).await?;
        self.repository.soft_delete(id).await?;

        tracing::debug!(todo_id = %id, owner = %caller, "Todo deleted");

        Ok(())
    }
}
