use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use validator::Validate;

/// Represents the 'posts' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// All posts, newest first. `id` breaks ties between equal timestamps.
    pub async fn list_recent(pool: &SqlitePool) -> Result<Vec<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, created_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn insert(pool: &SqlitePool, title: &str, content: &str) -> Result<Post, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, created_at)
            VALUES (?, ?, ?)
            RETURNING id, title, content, created_at
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
    }
}

/// Form for creating a new post.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreatePostForm {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 100,
        message = "Title length must be between 1 and 100 chars"
    ))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}
