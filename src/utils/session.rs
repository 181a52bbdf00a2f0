// src/utils/session.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    services::auth,
    state::AppState,
    utils::{
        cookies::{self, SESSION_COOKIE},
        flash::{self, Flash},
    },
};

/// Claims carried by the session cookie.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - Stores the User ID (as string).
    pub sub: String,
    /// Server-side session row this token refers to.
    pub sid: String,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

/// Identity of the logged-in user, resolved once per request and handed
/// to services explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub session_id: String,
}

/// Signs a session token for the user.
pub fn sign_session_token(
    user_id: i64,
    session_id: &str,
    secret: &str,
    expiration_seconds: u64,
) -> Result<String, AppError> {
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(e.to_string()))?
        .as_secs() as usize
        + expiration_seconds as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        sid: session_id.to_owned(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(e.to_string()))
}

/// Verifies and decodes a session token.
pub fn verify_session_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthenticated)?;

    Ok(token_data.claims)
}

/// Axum Middleware: session resolution.
///
/// Runs on every route. If the `session` cookie names a live session,
/// injects `CurrentUser` into the request extensions. Anonymous requests
/// pass through untouched.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = cookies::get(req.headers(), SESSION_COOKIE) {
        match auth::resolve_session(&state.pool, &state.config, token).await {
            Ok(Some(user)) => {
                req.extensions_mut().insert(user);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to resolve session: {}", e),
        }
    }
    next.run(req).await
}

/// Axum Middleware: login guard for HTML routes.
///
/// Must be used AFTER `session_middleware`. Anonymous users are sent to
/// `/login?next=<path>` with a flash message.
pub async fn login_required(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if req.extensions().get::<CurrentUser>().is_some() {
        return next.run(req).await;
    }

    let target = format!("/login?next={}", req.uri().path());
    match flash::set_cookie(
        Flash::info("Please log in to access this page."),
        &state.config.secret_key,
    ) {
        Ok(cookie) => (
            AppendHeaders([(header::SET_COOKIE, cookie)]),
            Redirect::to(&target),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to sign flash: {}", e);
            Redirect::to(&target).into_response()
        }
    }
}

/// Axum Middleware: login guard for the JSON API.
///
/// Anonymous requests get 401 with `{success: false, error}`.
pub async fn api_login_required(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    if req.extensions().get::<CurrentUser>().is_none() {
        return Err(AppError::Unauthenticated);
    }

    Ok(next.run(req).await)
}
