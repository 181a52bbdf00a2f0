use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::{Value, json};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::progress::SaveProgressRequest,
    services,
    utils::session::CurrentUser,
};

/// Records one progress entry.
/// Always answers with `{success: bool, error?: string}`.
pub async fn save_progress(
    State(pool): State<SqlitePool>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<SaveProgressRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    services::progress::save_progress(&pool, &user, request).await?;

    Ok(Json(json!({ "success": true })))
}
