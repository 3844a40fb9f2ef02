/// Todo model and database operations
///
/// Todos form a forest: each row optionally points at a parent todo via
/// `parent_id`. The self-referencing foreign key is ON DELETE CASCADE, so
/// deleting a todo removes its entire subtree at the storage level. Tree
/// traversal (progress, filtering, sorting) happens in [`crate::tree`]
/// over an arena built from these flat rows.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todos (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(200) NOT NULL,
///     notes TEXT,
///     due_date DATE,
///     priority todo_priority NOT NULL DEFAULT 'medium',
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     parent_id UUID REFERENCES todos(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Todo priority
///
/// Variant order is the sort order: high sorts before medium sorts before
/// low.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "todo_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TodoPriority {
    High,
    Medium,
    Low,
}

/// Todo record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique todo ID (UUID v4)
    pub id: Uuid,

    /// Title
    pub title: String,

    /// Optional free-text notes
    pub notes: Option<String>,

    /// Optional due date (calendar day, no time component)
    pub due_date: Option<NaiveDate>,

    /// Priority
    pub priority: TodoPriority,

    /// Completion flag; independent of any children's flags
    pub completed: bool,

    /// Parent todo when this is a subtask
    pub parent_id: Option<Uuid>,

    /// Owning user
    pub user_id: Uuid,

    /// When the todo was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new todo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    pub notes: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: TodoPriority,
    pub parent_id: Option<Uuid>,
    pub user_id: Uuid,
}

/// Input for updating an existing todo
///
/// All fields are optional; only non-None fields are written. `notes` and
/// `due_date` use a nested Option so Some(None) clears the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub notes: Option<Option<String>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub priority: Option<TodoPriority>,
    pub completed: Option<bool>,
}

impl Todo {
    /// Creates a new todo
    ///
    /// Callers must have verified that `parent_id`, when present, refers
    /// to a todo owned by the same user.
    pub async fn create(pool: &PgPool, data: CreateTodo) -> Result<Self, sqlx::Error> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (title, notes, due_date, priority, parent_id, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, notes, due_date, priority, completed, parent_id,
                      user_id, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.notes)
        .bind(data.due_date)
        .bind(data.priority)
        .bind(data.parent_id)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(todo)
    }

    /// Lists a user's todos, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let todos = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, notes, due_date, priority, completed, parent_id,
                   user_id, created_at
            FROM todos
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(todos)
    }

    /// Finds a todo by ID scoped to its owner
    pub async fn find_by_owner(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, notes, due_date, priority, completed, parent_id,
                   user_id, created_at
            FROM todos
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(todo)
    }

    /// Applies a partial update to an owned todo
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        data: UpdateTodo,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut clauses = Vec::new();
        let mut bind_count = 2;

        if data.title.is_some() {
            bind_count += 1;
            clauses.push(format!("title = ${}", bind_count));
        }
        if data.notes.is_some() {
            bind_count += 1;
            clauses.push(format!("notes = ${}", bind_count));
        }
        if data.due_date.is_some() {
            bind_count += 1;
            clauses.push(format!("due_date = ${}", bind_count));
        }
        if data.priority.is_some() {
            bind_count += 1;
            clauses.push(format!("priority = ${}", bind_count));
        }
        if data.completed.is_some() {
            bind_count += 1;
            clauses.push(format!("completed = ${}", bind_count));
        }

        if clauses.is_empty() {
            return Self::find_by_owner(pool, id, user_id).await;
        }

        let query = format!(
            "UPDATE todos SET {} WHERE id = $1 AND user_id = $2 \
             RETURNING id, title, notes, due_date, priority, completed, parent_id, \
             user_id, created_at",
            clauses.join(", ")
        );

        let mut q = sqlx::query_as::<_, Todo>(&query).bind(id).bind(user_id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(notes) = data.notes {
            q = q.bind(notes);
        }
        if let Some(due_date) = data.due_date {
            q = q.bind(due_date);
        }
        if let Some(priority) = data.priority {
            q = q.bind(priority);
        }
        if let Some(completed) = data.completed {
            q = q.bind(completed);
        }

        let todo = q.fetch_optional(pool).await?;

        Ok(todo)
    }

    /// Deletes an owned todo and, via the cascading self-FK, its subtree
    pub async fn delete_by_owner(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
