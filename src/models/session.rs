use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

/// Server-side record of one login.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub async fn insert(
        pool: &SqlitePool,
        id: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, sqlx::Error> {
        sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (id, user_id, created_at, expires_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, user_id, expires_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(Utc::now())
        .bind(expires_at)
        .fetch_one(pool)
        .await
    }

    pub async fn find(pool: &SqlitePool, id: &str) -> Result<Option<Session>, sqlx::Error> {
        sqlx::query_as::<_, Session>(
            "SELECT id, user_id, expires_at FROM sessions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Returns whether a row was removed.
    pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Drops every session that expired at or before `now`.
    /// Returns the number of rows removed.
    pub async fn purge_expired(pool: &SqlitePool, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
