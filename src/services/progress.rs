// src/services/progress.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::progress::{NewProgress, Progress, SaveProgressRequest},
    utils::session::CurrentUser,
};

const MAX_CATEGORY_LEN: usize = 50;

/// Appends one progress entry for today.
///
/// Any category string is accepted; there is no list of known categories.
pub async fn save_progress(
    pool: &SqlitePool,
    current_user: &CurrentUser,
    request: SaveProgressRequest,
) -> Result<Progress, AppError> {
    let category = request
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Validation("Category is required".to_string()))?;

    if category.chars().count() > MAX_CATEGORY_LEN {
        return Err(AppError::Validation(format!(
            "Category must be at most {} characters",
            MAX_CATEGORY_LEN
        )));
    }

    let completed = request
        .completed
        .ok_or_else(|| AppError::Validation("Completed flag is required".to_string()))?;

    let notes = request.notes.as_deref().unwrap_or("");

    let progress = Progress::insert(
        pool,
        NewProgress {
            user_id: current_user.id,
            date: Utc::now().date_naive(),
            category,
            completed,
            notes,
        },
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to save progress: {:?}", e);
        AppError::from(e)
    })?;

    tracing::debug!(
        user_id = current_user.id,
        category = %progress.category,
        completed = progress.completed,
        "Progress saved"
    );
    Ok(progress)
}
