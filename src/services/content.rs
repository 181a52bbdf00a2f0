// src/services/content.rs

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::post::{CreatePostForm, Post},
    utils::session::CurrentUser,
};

/// All posts, newest first.
pub async fn list_posts(pool: &SqlitePool) -> Result<Vec<Post>, AppError> {
    let posts = Post::list_recent(pool).await.map_err(|e| {
        tracing::error!("Failed to list posts: {:?}", e);
        AppError::from(e)
    })?;
    Ok(posts)
}

/// Publishes a post. Posts carry no author; the caller only has to be
/// logged in.
pub async fn create_post(
    pool: &SqlitePool,
    current_user: &CurrentUser,
    title: &str,
    content: &str,
) -> Result<Post, AppError> {
    let form = CreatePostForm {
        title: title.trim().to_string(),
        content: content.trim().to_string(),
    };
    form.validate()?;

    let post = Post::insert(pool, &form.title, &form.content)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create post: {:?}", e);
            AppError::from(e)
        })?;

    tracing::info!(post_id = post.id, user_id = current_user.id, "Post created");
    Ok(post)
}
