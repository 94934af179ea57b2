use crate::{
    db,
    error::AppError,
    extractors::extract_path,
    routes::AppState,
};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

/// `POST /api/subjects/{subject_id}/increment-view` — 과목 페이지를 열 때마다 호출됩니다.
pub async fn increment_view(
    State(state): State<AppState>,
    subject_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, AppError> {
    let raw_id = extract_path(subject_id)?;
    let subject_id = raw_id.trim();
    if subject_id.is_empty() {
        return Err(AppError::BadRequest("Subject id is required".to_string()));
    }

    if !db::increment_view(&state.pool, subject_id).await? {
        return Err(AppError::NotFound("Subject not found".to_string()));
    }

    tracing::debug!(subject_id, "View count incremented");
    Ok(Json(json!({ "message": "View count updated" })))
}
