// src/routes.rs

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{articles, auth, pages, progress},
    state::AppState,
    utils::session::{api_login_required, login_required, session_middleware},
    views::STATIC_PAGES,
};

/// Assembles the main application router.
///
/// * Public pages, including every entry of `STATIC_PAGES`.
/// * Login-guarded HTML routes (redirect to /login) and the JSON API
///   (401 payload).
/// * Session resolution on every route except `/static`, tracing on all.
pub fn create_router(state: AppState) -> Router {
    let mut public_routes = Router::new()
        .route("/", get(pages::index))
        .route("/articles", get(articles::list_articles))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login));

    for page in STATIC_PAGES {
        public_routes = public_routes.route(page.path, get(pages::static_page));
    }

    let protected_routes = Router::new()
        .route("/logout", get(auth::logout))
        .route(
            "/add_post",
            get(articles::add_post_page).post(articles::add_post),
        )
        .layer(middleware::from_fn_with_state(state.clone(), login_required));

    let api_routes = Router::new()
        .route("/save_progress", post(progress::save_progress))
        .layer(middleware::from_fn(api_login_required));

    // Static assets skip session resolution.
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
