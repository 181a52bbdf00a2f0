// src/services/auth.rs

use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::{
        session::Session,
        user::{RegisterForm, User},
    },
    utils::{
        hash::{hash_password, verify_password},
        session::{CurrentUser, sign_session_token, verify_session_token},
    },
};

/// A freshly established login.
#[derive(Debug, Clone)]
pub struct SessionToken {
    /// Signed value for the `session` cookie.
    pub token: String,
    pub user_id: i64,
}

/// Registers a new user.
///
/// Username and email are checked up front so the caller can tell which
/// one collided. The UNIQUE constraints catch registrations that race
/// past the check.
pub async fn register(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let form = RegisterForm {
        username: username.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    form.validate()?;

    if User::find_by_username(pool, &form.username).await?.is_some() {
        return Err(AppError::DuplicateUsername);
    }
    if User::email_exists(pool, &form.email).await? {
        return Err(AppError::DuplicateEmail);
    }

    let hashed_password = hash_password(&form.password)?;

    let user = User::insert(pool, &form.username, &form.email, &hashed_password)
        .await
        .map_err(map_unique_violation)?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");
    Ok(user)
}

/// SQLite reports "UNIQUE constraint failed: users.<column>".
fn map_unique_violation(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return if db_err.message().contains("users.email") {
                AppError::DuplicateEmail
            } else {
                AppError::DuplicateUsername
            };
        }
    }
    tracing::error!("Failed to register user: {:?}", err);
    AppError::from(err)
}

/// Authenticates a user and opens a server-side session.
pub async fn login(
    pool: &SqlitePool,
    config: &Config,
    username: &str,
    password: &str,
) -> Result<SessionToken, AppError> {
    let user = User::find_by_username(pool, username.trim())
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(password, &user.password)? {
        tracing::info!(username = %user.username, "Rejected login: bad password");
        return Err(AppError::InvalidCredentials);
    }

    let session_id = uuid::Uuid::new_v4().to_string();
    let ttl = i64::try_from(config.session_ttl)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(|| AppError::Internal("session ttl out of range".to_string()))?;
    let now = Utc::now();
    let expires_at = now
        .checked_add_signed(ttl)
        .ok_or_else(|| AppError::Internal("session ttl out of range".to_string()))?;

    let purged = Session::purge_expired(pool, now).await?;
    if purged > 0 {
        tracing::debug!(purged, "Removed expired sessions");
    }
    Session::insert(pool, &session_id, user.id, expires_at).await?;

    let token = sign_session_token(user.id, &session_id, &config.secret_key, config.session_ttl)?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(SessionToken {
        token,
        user_id: user.id,
    })
}

/// Ends the caller's session. A replayed cookie stops working afterwards.
pub async fn logout(pool: &SqlitePool, current_user: &CurrentUser) -> Result<(), AppError> {
    if !Session::delete(pool, &current_user.session_id).await? {
        return Err(AppError::Unauthenticated);
    }
    tracing::info!(user_id = current_user.id, "User logged out");
    Ok(())
}

/// Resolves a session cookie to the logged-in user.
///
/// Returns `None` for bad signatures, unknown or expired sessions, and
/// sessions whose owner does not match the token.
pub async fn resolve_session(
    pool: &SqlitePool,
    config: &Config,
    token: &str,
) -> Result<Option<CurrentUser>, AppError> {
    let Ok(claims) = verify_session_token(token, &config.secret_key) else {
        return Ok(None);
    };
    let Ok(user_id) = claims.sub.parse::<i64>() else {
        return Ok(None);
    };

    let Some(session) = Session::find(pool, &claims.sid).await? else {
        return Ok(None);
    };
    if session.user_id != user_id {
        return Ok(None);
    }
    if session.is_expired(Utc::now()) {
        Session::delete(pool, &session.id).await?;
        return Ok(None);
    }

    let user = User::find_by_id(pool, user_id).await?;
    Ok(user.map(|user| CurrentUser {
        id: user.id,
        username: user.username,
        session_id: session.id,
    }))
}
