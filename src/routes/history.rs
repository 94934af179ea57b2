use crate::{db, error::AppError, models::HistoryEntry, routes::AppState};
use axum::{extract::State, Json};

/// `GET /api/history` — 학과/과목/리뷰 목록 버전을 합친 전체 이력 (최신순)
///
/// 쿼리가 실패하면 빈 배열이 아니라 500을 돌려줍니다.
pub async fn get_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let entries = db::get_history(&state.pool).await?;
    Ok(Json(entries))
}
