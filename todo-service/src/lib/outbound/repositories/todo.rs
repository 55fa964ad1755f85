use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::account::models::AccountId;
use crate::todo::errors::TodoError;
use crate::todo::models::NewTodo;
use crate::todo::models::Pagination;
use crate::todo::models::Todo;
use crate::todo::models::TodoFilter;
use crate::todo::models::TodoId;
use crate::todo::models::TodoPriority;
use crate::todo::models::TodoStatus;
use crate::todo::ports::TodoRepository;

pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_todo(row: &PgRow) -> Result<Todo, TodoError> {
        let status: String = row.get("status");
        let priority: String = row.get("priority");

        Ok(Todo {
            id: TodoId(row.get("id")),
            title: row.get("title"),
            description: row.get("description"),
            status: status.parse::<TodoStatus>()?,
            priority: priority.parse::<TodoPriority>()?,
            due_date: row.get("due_date"),
            owner_id: AccountId(row.get("user_id")),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError> {
        let row = sqlx::query(
            r#"
            INSERT INTO todos (title, description, status, priority, due_date, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, status, priority, due_date, user_id,
                      created_at, updated_at
            "#,
        )
        .bind(todo.title.as_str())
        .bind(&todo.description)
        .bind(todo.status.as_str())
        .bind(todo.priority.as_str())
        .bind(todo.due_date)
        .bind(todo.owner_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        Self::row_to_todo(&row)
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, status, priority, due_date, user_id,
                   created_at, updated_at
            FROM todos
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_todo).transpose()
    }

    async fn list_by_owner(
        &self,
        owner_id: AccountId,
        filter: TodoFilter,
        pagination: Option<Pagination>,
    ) -> Result<Vec<Todo>, TodoError> {
        // LIMIT NULL means no limit
        let limit = pagination.map(|p| i64::from(p.limit()));
        let offset = pagination.map(|p| p.offset()).unwrap_or(0);

        let rows = sqlx::query(
            r#"
            SELECT id, title, description, status, priority, due_date, user_id,
                   created_at, updated_at
            FROM todos
            WHERE user_id = $1
              AND deleted_at IS NULL
              AND ($2::VARCHAR IS NULL OR status = $2)
              AND ($3::VARCHAR IS NULL OR priority = $3)
            ORDER BY created_at DESC, id DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(owner_id.0)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.priority.map(|p| p.as_str()))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_todo).collect()
    }

    async fn count_by_owner(
        &self,
        owner_id: AccountId,
        filter: TodoFilter,
    ) -> Result<i64, TodoError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM todos
            WHERE user_id = $1
              AND deleted_at IS NULL
              AND ($2::VARCHAR IS NULL OR status = $2)
              AND ($3::VARCHAR IS NULL OR priority = $3)
            "#,
        )
        .bind(owner_id.0)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.priority.map(|p| p.as_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let row = sqlx::query(
            r#"
            UPDATE todos
            SET title = $2,
                description = $3,
                status = $4,
                priority = $5,
                due_date = $6,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, title, description, status, priority, due_date, user_id,
                      created_at, updated_at
            "#,
        )
        .bind(todo.id.0)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.status.as_str())
        .bind(todo.priority.as_str())
        .bind(todo.due_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => Self::row_to_todo(&r),
            None => Err(TodoError::NotFound(todo.id.to_string())),
        }
    }

    async fn soft_delete(&self, id: TodoId) -> Result<(), TodoError> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
