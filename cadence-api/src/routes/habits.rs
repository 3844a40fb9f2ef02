/// Habit endpoints
///
/// CRUD for habits plus the two endpoints the analytics engine backs:
/// toggling a completion date and computing streak/rate stats. All
/// endpoints require JWT authentication and only ever touch the
/// authenticated user's habits.
///
/// # Endpoints
///
/// - `GET    /v1/habits` - List habits
/// - `POST   /v1/habits` - Create habit
/// - `GET    /v1/habits/:id` - Get habit
/// - `PUT    /v1/habits/:id` - Update habit
/// - `DELETE /v1/habits/:id` - Delete habit
/// - `POST   /v1/habits/:id/toggle` - Toggle a completion date
/// - `GET    /v1/habits/:id/stats` - Streak and completion-rate stats

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
    analytics::{calendar, history, rate, streak},
    auth::middleware::AuthContext,
    models::habit::{CreateHabit, Habit, HabitFrequency, UpdateHabit},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Create habit request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateHabitRequest {
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Free-text category
    #[validate(length(min = 1, max = 50, message = "Category must be 1-50 characters"))]
    pub category: String,

    /// Completion frequency
    pub frequency: HabitFrequency,

    /// Reminder time-of-day; display only
    #[serde(default)]
    pub reminder: String,

    /// Display color (`#RRGGBB`)
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "#3B82F6".to_string()
}

/// Update habit request
///
/// All fields optional; only present fields are written.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateHabitRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Category must be 1-50 characters"))]
    pub category: Option<String>,

    pub frequency: Option<HabitFrequency>,

    pub reminder: Option<String>,

    pub color: Option<String>,
}

/// Toggle request
///
/// Omitting `date` toggles the server's current UTC day.
#[derive(Debug, Default, Deserialize)]
pub struct ToggleRequest {
    /// Day to toggle as `YYYY-MM-DD`
    #[serde(default)]
    pub date: Option<String>,
}

/// Stats query parameters
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    /// Reference day as `YYYY-MM-DD`; defaults to the current UTC day
    #[serde(default)]
    pub today: Option<String>,

    /// Completion-rate window length; defaults to 90
    #[serde(default)]
    pub window_days: Option<u32>,
}

/// Stats response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Consecutive-interval run ending at the reference day
    pub current_streak: u32,

    /// Longest run anywhere in the history
    pub best_streak: u32,

    /// Percentage of expected completions hit inside the window, 0-100
    pub completion_rate: u8,

    /// Window length the rate was computed over
    pub window_days: u32,

    /// Reference day the stats were computed against
    pub today: String,
}

/// Resolves an optional `YYYY-MM-DD` parameter, defaulting to the
/// current UTC day
fn resolve_day(raw: Option<&str>, field: &str) -> ApiResult<NaiveDate> {
    match raw {
        None => Ok(Utc::now().date_naive()),
        Some(s) => calendar::parse_day(s)
            .ok_or_else(|| ApiError::BadRequest(format!("Invalid {}: expected YYYY-MM-DD", field))),
    }
}

/// List habits
///
/// Returns the authenticated user's habits, newest first.
pub async fn list_habits(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Habit>>> {
    let habits = Habit::list_by_user(&state.db, auth.user_id).await?;
    Ok(Json(habits))
}

/// Create habit
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `401 Unauthorized`: Missing or invalid JWT token
pub async fn create_habit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateHabitRequest>,
) -> ApiResult<Json<Habit>> {
    req.validate()?;

    let habit = Habit::create(
        &state.db,
        CreateHabit {
            name: req.name,
            category: req.category,
            frequency: req.frequency,
            reminder: req.reminder,
            color: req.color,
            user_id: auth.user_id,
        },
    )
    .await?;

    Ok(Json(habit))
}

/// Get a single habit
///
/// # Errors
///
/// - `404 Not Found`: Habit missing or owned by another user
pub async fn get_habit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Habit>> {
    let habit = Habit::find_by_owner(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Habit not found".to_string()))?;

    Ok(Json(habit))
}

/// Update habit
///
/// Partial update; absent fields are left untouched. History is not
/// editable here, use the toggle endpoint.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `404 Not Found`: Habit missing or owned by another user
pub async fn update_habit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateHabitRequest>,
) -> ApiResult<Json<Habit>> {
    req.validate()?;

    let habit = Habit::update(
        &state.db,
        id,
        auth.user_id,
        UpdateHabit {
            name: req.name,
            category: req.category,
            frequency: req.frequency,
            reminder: req.reminder,
            history: None,
            color: req.color,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Habit not found".to_string()))?;

    Ok(Json(habit))
}

/// Delete habit
///
/// # Errors
///
/// - `404 Not Found`: Habit missing or owned by another user
pub async fn delete_habit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = Habit::delete_by_owner(&state.db, id, auth.user_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Habit not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Toggle a completion date
///
/// Removes the date from the habit's history when present, adds it
/// otherwise; the stored history stays sorted and duplicate-free.
/// Returns the updated habit.
///
/// # Endpoint
///
/// ```text
/// POST /v1/habits/:id/toggle
/// Content-Type: application/json
///
/// { "date": "2025-08-30" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed date
/// - `404 Not Found`: Habit missing or owned by another user
pub async fn toggle_habit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<ToggleRequest>,
) -> ApiResult<Json<Habit>> {
    let day = resolve_day(req.date.as_deref(), "date")?;
    let date = calendar::to_iso(day);

    let habit = Habit::find_by_owner(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Habit not found".to_string()))?;

    let new_history = history::toggle_day(&habit.history, &date);

    let habit = Habit::update(
        &state.db,
        id,
        auth.user_id,
        UpdateHabit {
            history: Some(new_history),
            ..Default::default()
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Habit not found".to_string()))?;

    Ok(Json(habit))
}

/// Streak and completion-rate stats
///
/// Computes stats against an explicit reference day so clients in other
/// timezones (and tests) get deterministic results.
///
/// # Endpoint
///
/// ```text
/// GET /v1/habits/:id/stats?today=2025-08-30&windowDays=90
/// ```
///
/// # Response
///
/// ```json
/// {
///   "currentStreak": 4,
///   "bestStreak": 12,
///   "completionRate": 63,
///   "windowDays": 90,
///   "today": "2025-08-30"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed `today` or out-of-range `windowDays`
/// - `404 Not Found`: Habit missing or owned by another user
pub async fn habit_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Query(query): Query<StatsQuery>,
) -> ApiResult<Json<StatsResponse>> {
    let today = resolve_day(query.today.as_deref(), "today")?;
    let window_days = query.window_days.unwrap_or(rate::DEFAULT_WINDOW_DAYS);

    // The rate computation walks one step per expected interval, so an
    // unbounded window would let a single request burn CPU.
    if window_days == 0 || window_days > rate::MAX_WINDOW_DAYS {
        return Err(ApiError::BadRequest(format!(
            "Invalid windowDays: expected 1-{}",
            rate::MAX_WINDOW_DAYS
        )));
    }

    let habit = Habit::find_by_owner(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Habit not found".to_string()))?;

    Ok(Json(StatsResponse {
        current_streak: streak::current_streak(&habit.history, habit.frequency, today),
        best_streak: streak::best_streak(&habit.history, habit.frequency),
        completion_rate: rate::completion_rate(&habit.history, habit.frequency, today, window_days),
        window_days,
        today: calendar::to_iso(today),
    }))
}
