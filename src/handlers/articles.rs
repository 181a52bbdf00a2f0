use axum::{
    Extension, Form,
    extract::State,
    response::{Redirect, IntoResponse, Response},
};

use crate::{
    error::AppError,
    handlers::page::{PageContext, redirect_with_flash},
    models::post::CreatePostForm,
    services,
    state::AppState,
    utils::{flash::Flash, session::CurrentUser},
    views,
};

/// Lists posts, newest first.
pub async fn list_articles(State(state): State<AppState>, page: PageContext) -> Response {
    match services::content::list_posts(&state.pool).await {
        Ok(posts) => page.render("Articles", &views::articles(&posts)),
        Err(_) => redirect_with_flash(
            "/",
            Flash::error("Articles are unavailable right now."),
            &state.config.secret_key,
        ),
    }
}

pub async fn add_post_page(page: PageContext) -> Response {
    page.render("New post", &views::add_post_form(None))
}

pub async fn add_post(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    page: PageContext,
    Form(form): Form<CreatePostForm>,
) -> Response {
    match services::content::create_post(&state.pool, &user, &form.title, &form.content).await {
        Ok(_) => Redirect::to("/articles").into_response(),
        Err(AppError::Validation(msg)) => page.render("New post", &views::add_post_form(Some(&msg))),
        Err(_) => page.render(
            "New post",
            &views::add_post_form(Some("Could not save the post, please try again.")),
        ),
    }
}
