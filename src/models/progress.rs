use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// One row of the append-only 'progress' log.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Progress {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub category: String,
    pub completed: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Values for a new progress row.
#[derive(Debug, Clone)]
pub struct NewProgress<'a> {
    pub user_id: i64,
    pub date: NaiveDate,
    pub category: &'a str,
    pub completed: bool,
    pub notes: &'a str,
}

impl Progress {
    pub async fn insert(pool: &SqlitePool, new: NewProgress<'_>) -> Result<Progress, sqlx::Error> {
        sqlx::query_as::<_, Progress>(
            r#"
            INSERT INTO progress (user_id, date, category, completed, notes, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, date, category, completed, notes, created_at
            "#,
        )
        .bind(new.user_id)
        .bind(new.date)
        .bind(new.category)
        .bind(new.completed)
        .bind(new.notes)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
    }

    pub async fn list_by_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Progress>, sqlx::Error> {
        sqlx::query_as::<_, Progress>(
            r#"
            SELECT id, user_id, date, category, completed, notes, created_at
            FROM progress
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}

/// JSON body of `POST /save_progress`.
/// Every field is optional at the parsing stage; the service decides what
/// is required.
#[derive(Debug, Default, Deserialize)]
pub struct SaveProgressRequest {
    pub category: Option<String>,
    pub completed: Option<bool>,
    pub notes: Option<String>,
}
