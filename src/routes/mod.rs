//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `history`: 통합 변경 이력 피드
//! - `reviews`: 리뷰 조회/작성/수정/삭제
//! - `subjects`: 과목 조회수 증가
//! - `versions`: 학과/과목/리뷰 목록 버전 기록과 조회

pub mod health;
pub mod history;
pub mod reviews;
pub mod subjects;
pub mod versions;

#[cfg(test)]
mod tests;

use crate::error::AppError;
use axum::{
    routing::{get, patch, post},
    Router,
};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// `#[derive(Clone)]`: Axum의 State Extractor가 내부적으로 clone하므로 필수입니다.
/// SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀. 프로세스 전체에서 공유하는 유일한 자원입니다.
    pub pool: SqlitePool,
    /// 다른 사람의 리뷰도 삭제할 수 있는 모더레이터의 사용자 ID
    pub moderator_user_id: Option<String>,
}

impl AppState {
    pub fn is_moderator(&self, user_id: &str) -> bool {
        self.moderator_user_id.as_deref() == Some(user_id)
    }
}

/// API 라우터를 만듭니다. main.rs에서 `/api` 아래에 중첩(nest)됩니다.
///
/// Axum 0.8부터 경로 파라미터는 `{name}` 문법을 씁니다.
/// 핸들러에서는 `Path(name)`으로 추출합니다.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        // 버전 기록과 조회
        .route(
            "/fields/{field_id}/version",
            post(versions::record_field_version),
        )
        .route(
            "/fields/{field_id}/versions",
            get(versions::list_field_versions),
        )
        .route(
            "/subjects/{subject_id}/version",
            post(versions::record_subject_version),
        )
        .route(
            "/subjects/{subject_id}/versions",
            get(versions::list_subject_versions),
        )
        .route(
            "/subjects/{subject_id}/reviews/version",
            post(versions::record_review_version),
        )
        .route(
            "/subjects/{subject_id}/reviews/versions",
            get(versions::list_review_versions),
        )
        .route(
            "/versions/{version_id}/subjects",
            get(versions::get_version_subjects),
        )
        // 통합 이력
        .route("/history", get(history::get_history))
        // 조회수
        .route(
            "/subjects/{subject_id}/increment-view",
            post(subjects::increment_view),
        )
        // 리뷰
        .route(
            "/subjects/{subject_id}/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route(
            "/reviews/{review_id}",
            patch(reviews::update_review).delete(reviews::delete_review),
        )
        .route("/health", get(health::health_check))
        .with_state(state)
}

/// 필수 문자열 필드를 꺼냅니다. 없거나 공백뿐이면 고정 메시지의 400.
pub(crate) fn require(value: Option<String>, message: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(message.to_string()))
}
