// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use validator::Validate;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Unique username.
    pub username: String,

    /// Unique email address.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub created_at: DateTime<Utc>,
}

impl User {
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    pub async fn email_exists(pool: &SqlitePool, email: &str) -> Result<bool, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    /// Inserts a user whose password has already been hashed.
    pub async fn insert(
        pool: &SqlitePool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, username, email, password, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
    }
}

/// Registration form.
/// Missing fields deserialize as empty strings so they surface as
/// validation messages rather than extractor rejections.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 20,
        message = "Username length must be between 1 and 20 characters."
    ))]
    pub username: String,

    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 120,
        message = "Email length must be between 1 and 120 characters."
    ))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

/// Login form.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Page to return to after logging in.
    pub next: Option<String>,
}

/// Query string of the login page (`/login?next=/add_post`).
#[derive(Debug, Default, Deserialize)]
pub struct LoginParams {
    pub next: Option<String>,
}
