/// Habit model and database operations
///
/// A habit belongs to exactly one user for its lifetime. Its completion
/// history is a set of plain `YYYY-MM-DD` strings stored as TEXT[], so
/// values round-trip through the API byte-for-byte; the analytics engine
/// ([`crate::analytics`]) parses them on read and skips anything
/// malformed.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE habits (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(100) NOT NULL,
///     category VARCHAR(50) NOT NULL,
///     frequency habit_frequency NOT NULL,
///     reminder TEXT NOT NULL DEFAULT '',
///     history TEXT[] NOT NULL DEFAULT '{}',
///     color TEXT NOT NULL,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// How often a habit is expected to be completed
///
/// Determines the interval step used by streak and rate calculations:
/// daily and monthly step one day, weekly steps seven. Unrecognized values
/// never reach this enum; serde rejects them at the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "habit_frequency", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    /// One expected completion per calendar day
    Daily,

    /// One expected completion per week
    Weekly,

    /// Evaluated on a daily step, like daily
    Monthly,
}

/// Habit record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique habit ID (UUID v4)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Free-text category
    pub category: String,

    /// Completion frequency
    pub frequency: HabitFrequency,

    /// Reminder time-of-day, display only; empty when unset
    pub reminder: String,

    /// Completion dates as ISO `YYYY-MM-DD` strings, no duplicates
    pub history: Vec<String>,

    /// Display color (`#RRGGBB`)
    pub color: String,

    /// Owning user
    pub user_id: Uuid,

    /// When the habit was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new habit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHabit {
    pub name: String,
    pub category: String,
    pub frequency: HabitFrequency,
    pub reminder: String,
    pub color: String,
    pub user_id: Uuid,
}

/// Input for updating an existing habit
///
/// All fields are optional; only non-None fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateHabit {
    pub name: Option<String>,
    pub category: Option<String>,
    pub frequency: Option<HabitFrequency>,
    pub reminder: Option<String>,
    pub history: Option<Vec<String>>,
    pub color: Option<String>,
}

impl Habit {
    /// Creates a new habit with an empty history
    pub async fn create(pool: &PgPool, data: CreateHabit) -> Result<Self, sqlx::Error> {
        let habit = sqlx::query_as::<_, Habit>(
            r#"
            INSERT INTO habits (name, category, frequency, reminder, color, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, category, frequency, reminder, history, color,
                      user_id, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.category)
        .bind(data.frequency)
        .bind(data.reminder)
        .bind(data.color)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(habit)
    }

    /// Lists a user's habits, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let habits = sqlx::query_as::<_, Habit>(
            r#"
            SELECT id, name, category, frequency, reminder, history, color,
                   user_id, created_at
            FROM habits
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(habits)
    }

    /// Finds a habit by ID scoped to its owner
    ///
    /// A habit belonging to another user is indistinguishable from a
    /// missing one: both return None.
    pub async fn find_by_owner(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let habit = sqlx::query_as::<_, Habit>(
            r#"
            SELECT id, name, category, frequency, reminder, history, color,
                   user_id, created_at
            FROM habits
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(habit)
    }

    /// Applies a partial update to an owned habit
    ///
    /// Builds the SET clause dynamically from the fields present in
    /// `data`; an update with no fields degenerates to a lookup. Returns
    /// the updated habit, or None when the habit does not exist or belongs
    /// to someone else.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        data: UpdateHabit,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut clauses = Vec::new();
        let mut bind_count = 2;

        if data.name.is_some() {
            bind_count += 1;
            clauses.push(format!("name = ${}", bind_count));
        }
        if data.category.is_some() {
            bind_count += 1;
            clauses.push(format!("category = ${}", bind_count));
        }
        if data.frequency.is_some() {
            bind_count += 1;
            clauses.push(format!("frequency = ${}", bind_count));
        }
        if data.reminder.is_some() {
            bind_count += 1;
            clauses.push(format!("reminder = ${}", bind_count));
        }
        if data.history.is_some() {
            bind_count += 1;
            clauses.push(format!("history = ${}", bind_count));
        }
        if data.color.is_some() {
            bind_count += 1;
            clauses.push(format!("color = ${}", bind_count));
        }

        if clauses.is_empty() {
            return Self::find_by_owner(pool, id, user_id).await;
        }

        let query = format!(
            "UPDATE habits SET {} WHERE id = $1 AND user_id = $2 \
             RETURNING id, name, category, frequency, reminder, history, color, \
             user_id, created_at",
            clauses.join(", ")
        );

        let mut q = sqlx::query_as::<_, Habit>(&query).bind(id).bind(user_id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(category) = data.category {
            q = q.bind(category);
        }
        if let Some(frequency) = data.frequency {
            q = q.bind(frequency);
        }
        if let Some(reminder) = data.reminder {
            q = q.bind(reminder);
        }
        if let Some(history) = data.history {
            q = q.bind(history);
        }
        if let Some(color) = data.color {
            q = q.bind(color);
        }

        let habit = q.fetch_optional(pool).await?;

        Ok(habit)
    }

    /// Deletes an owned habit
    ///
    /// Returns true if a row was deleted; false covers both a missing
    /// habit and one owned by another user.
    pub async fn delete_by_owner(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM habits WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&HabitFrequency::Weekly).unwrap(),
            "\"weekly\""
        );
        let parsed: HabitFrequency = serde_json::from_str("\"daily\"").unwrap();
        assert_eq!(parsed, HabitFrequency::Daily);
    }

    #[test]
    fn test_frequency_rejects_unknown_value() {
        let parsed: Result<HabitFrequency, _> = serde_json::from_str("\"hourly\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_update_habit_default_is_empty() {
        let update = UpdateHabit::default();
        assert!(update.name.is_none());
        assert!(update.history.is_none());
        assert!(update.color.is_none());
    }

    #[test]
    fn test_habit_wire_field_names() {
        let habit = Habit {
            id: Uuid::nil(),
            name: "Read".to_string(),
            category: "Learning".to_string(),
            frequency: HabitFrequency::Daily,
            reminder: String::new(),
            history: vec!["2024-01-01".to_string()],
            color: "#22C55E".to_string(),
            user_id: Uuid::nil(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&habit).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["history"][0], "2024-01-01");
    }
}
