/// Todo endpoints
///
/// CRUD over flat todo rows plus the tree view, which assembles the
/// rows into a forest, applies the text query and structured filters,
/// sorts every sibling group, and returns nested subtrees with computed
/// progress. All endpoints require JWT authentication.
///
/// # Endpoints
///
/// - `GET    /v1/todos` - List todos as flat rows
/// - `POST   /v1/todos` - Create todo
/// - `GET    /v1/todos/tree` - Filtered and sorted tree view
/// - `GET    /v1/todos/:id` - Get todo
/// - `PUT    /v1/todos/:id` - Update todo
/// - `DELETE /v1/todos/:id` - Delete todo (and its whole subtree)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use cadence_shared::{
    auth::middleware::AuthContext,
    models::todo::{CreateTodo, Todo, TodoPriority, UpdateTodo},
    tree::{SortKey, StatusFilter, TaskArena, TaskFilter, TaskTree},
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::Validate;

/// Deserializes `Option<Option<T>>` so a present-but-null field becomes
/// Some(None), distinguishing "clear the value" from "leave untouched"
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Create todo request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    /// Title
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// Optional free-text notes
    #[serde(default)]
    pub notes: Option<String>,

    /// Optional due date
    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    /// Priority; defaults to medium
    #[serde(default = "default_priority")]
    pub priority: TodoPriority,

    /// Parent todo when creating a subtask
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

fn default_priority() -> TodoPriority {
    TodoPriority::Medium
}

/// Update todo request
///
/// All fields optional; only present fields are written. `notes` and
/// `dueDate` accept an explicit null to clear the value.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<NaiveDate>>,

    pub priority: Option<TodoPriority>,

    pub completed: Option<bool>,
}

/// Tree view query parameters
#[derive(Debug, Default, Deserialize)]
pub struct TreeQuery {
    /// Case-insensitive substring over title and notes
    #[serde(default)]
    pub q: Option<String>,

    /// `high` | `medium` | `low`
    #[serde(default)]
    pub priority: Option<String>,

    /// `all` | `open` | `done`
    #[serde(default)]
    pub status: Option<String>,

    /// `title` | `priority` | `dueAsc` | `dueDesc`
    #[serde(default)]
    pub sort: Option<String>,
}

fn parse_priority(s: &str) -> ApiResult<TodoPriority> {
    match s {
        "high" => Ok(TodoPriority::High),
        "medium" => Ok(TodoPriority::Medium),
        "low" => Ok(TodoPriority::Low),
        _ => Err(ApiError::BadRequest(format!(
            "Invalid priority: {} (expected high, medium, or low)",
            s
        ))),
    }
}

fn parse_status(s: &str) -> ApiResult<StatusFilter> {
    match s {
        "all" => Ok(StatusFilter::All),
        "open" => Ok(StatusFilter::Open),
        "done" => Ok(StatusFilter::Done),
        _ => Err(ApiError::BadRequest(format!(
            "Invalid status: {} (expected all, open, or done)",
            s
        ))),
    }
}

fn parse_sort(s: &str) -> ApiResult<SortKey> {
    match s {
        "title" => Ok(SortKey::Title),
        "priority" => Ok(SortKey::Priority),
        "dueAsc" => Ok(SortKey::DueAsc),
        "dueDesc" => Ok(SortKey::DueDesc),
        _ => Err(ApiError::BadRequest(format!(
            "Invalid sort: {} (expected title, priority, dueAsc, or dueDesc)",
            s
        ))),
    }
}

/// List todos as flat rows
///
/// Returns the authenticated user's todos, newest first, with
/// `parentId` links intact. Use the tree endpoint for nesting.
pub async fn list_todos(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Todo>>> {
    let todos = Todo::list_by_user(&state.db, auth.user_id).await?;
    Ok(Json(todos))
}

/// Create todo
///
/// A `parentId` must refer to one of the caller's own todos.
///
/// # Errors
///
/// - `400 Bad Request`: Parent todo missing or owned by another user
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTodoRequest>,
) -> ApiResult<Json<Todo>> {
    req.validate()?;

    if let Some(parent_id) = req.parent_id {
        Todo::find_by_owner(&state.db, parent_id, auth.user_id)
            .await?
            .ok_or_else(|| ApiError::BadRequest("Parent todo not found".to_string()))?;
    }

    let todo = Todo::create(
        &state.db,
        CreateTodo {
            title: req.title,
            notes: req.notes,
            due_date: req.due_date,
            priority: req.priority,
            parent_id: req.parent_id,
            user_id: auth.user_id,
        },
    )
    .await?;

    Ok(Json(todo))
}

/// Filtered and sorted tree view
///
/// Builds the user's todo forest and applies, in order: the text query
/// and structured filters (a todo survives when it matches or any
/// descendant does), then the sibling-group sort. Each returned subtree
/// carries a computed `progress` percentage.
///
/// # Endpoint
///
/// ```text
/// GET /v1/todos/tree?q=report&priority=high&status=open&sort=dueAsc
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Unrecognized priority, status, or sort value
pub async fn todo_tree(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<TreeQuery>,
) -> ApiResult<Json<Vec<TaskTree>>> {
    let filter = TaskFilter {
        priority: query.priority.as_deref().map(parse_priority).transpose()?,
        status: query
            .status
            .as_deref()
            .map(parse_status)
            .transpose()?
            .unwrap_or_default(),
    };
    let sort = query.sort.as_deref().map(parse_sort).transpose()?;

    let rows = Todo::list_by_user(&state.db, auth.user_id).await?;
    let arena = TaskArena::from_rows(&rows);

    let mut view = arena.filtered(query.q.as_deref().unwrap_or_default(), &filter);
    if let Some(key) = sort {
        view.sort_by(key);
    }

    Ok(Json(view.to_tree()))
}

/// Get a single todo
///
/// # Errors
///
/// - `404 Not Found`: Todo missing or owned by another user
pub async fn get_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Todo>> {
    let todo = Todo::find_by_owner(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Todo not found".to_string()))?;

    Ok(Json(todo))
}

/// Update todo
///
/// Partial update; absent fields are left untouched. Completing a todo
/// never touches its children or parent.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `404 Not Found`: Todo missing or owned by another user
pub async fn update_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTodoRequest>,
) -> ApiResult<Json<Todo>> {
    req.validate()?;

    let todo = Todo::update(
        &state.db,
        id,
        auth.user_id,
        UpdateTodo {
            title: req.title,
            notes: req.notes,
            due_date: req.due_date,
            priority: req.priority,
            completed: req.completed,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Todo not found".to_string()))?;

    Ok(Json(todo))
}

/// Delete todo
///
/// Deletes the todo and, through the cascading foreign key, its entire
/// subtree.
///
/// # Errors
///
/// - `404 Not Found`: Todo missing or owned by another user
pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = Todo::delete_by_owner(&state.db, id, auth.user_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Todo not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
