// src/handlers/auth.rs

use axum::{
    Extension, Form,
    extract::{Query, State},
    http::header,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};

use crate::{
    error::AppError,
    handlers::page::{PageContext, redirect_with_flash},
    models::user::{LoginForm, LoginParams, RegisterForm},
    services,
    state::AppState,
    utils::{
        cookies::{self, SESSION_COOKIE},
        flash::Flash,
        session::CurrentUser,
    },
    views,
};

pub async fn register_page(page: PageContext) -> Response {
    page.render("Register", &views::register_form())
}

/// Registers a new user.
///
/// Success sends the user to the login page; every failure goes back to
/// the form with a message saying what went wrong.
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    let secret = &state.config.secret_key;

    match services::auth::register(&state.pool, &form.username, &form.email, &form.password).await
    {
        Ok(_) => redirect_with_flash(
            "/login",
            Flash::success("Registration successful! You can now log in."),
            secret,
        ),
        Err(e) => {
            let message = match e {
                AppError::DuplicateUsername => "User already exists".to_string(),
                AppError::DuplicateEmail => "Email is already in use".to_string(),
                AppError::Validation(msg) => msg,
                other => {
                    tracing::error!("Registration failed: {}", other);
                    "Registration failed, please try again.".to_string()
                }
            };
            redirect_with_flash("/register", Flash::error(message), secret)
        }
    }
}

pub async fn login_page(page: PageContext, Query(params): Query<LoginParams>) -> Response {
    let next = params.next.as_deref().filter(|n| is_local_path(n));
    page.render("Log in", &views::login_form(next))
}

/// Authenticates a user and sets the session cookie.
pub async fn login(
    State(state): State<AppState>,
    page: PageContext,
    Form(form): Form<LoginForm>,
) -> Response {
    let next = form.next.as_deref().filter(|n| is_local_path(n));

    match services::auth::login(&state.pool, &state.config, &form.username, &form.password).await {
        Ok(session) => {
            let cookie = cookies::build(SESSION_COOKIE, &session.token, state.config.session_ttl);
            (
                AppendHeaders([(header::SET_COOKIE, cookie)]),
                Redirect::to(next.unwrap_or("/")),
            )
                .into_response()
        }
        Err(AppError::InvalidCredentials) => page
            .with_flash(Flash::error("Invalid username or password"))
            .render("Log in", &views::login_form(next)),
        Err(e) => {
            tracing::error!("Login failed: {}", e);
            page.with_flash(Flash::error("Login failed, please try again."))
                .render("Log in", &views::login_form(next))
        }
    }
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Response {
    if let Err(e) = services::auth::logout(&state.pool, &user).await {
        tracing::warn!("Logout for user {} failed: {}", user.id, e);
    }
    (
        AppendHeaders([(header::SET_COOKIE, cookies::clear(SESSION_COOKIE))]),
        Redirect::to("/"),
    )
        .into_response()
}

/// Only same-site absolute paths are accepted as redirect targets.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}
