//! # 리뷰 모델 정의
//!
//! 과목에 달리는 별점 리뷰와, 리뷰를 작성/수정/삭제하는 요청 본문입니다.
//! 요청 본문은 프론트엔드(React)의 관례에 맞춰 camelCase 키를 받습니다.

use serde::{Deserialize, Serialize};

/// 리뷰 엔티티 — DB의 `reviews` 테이블 한 행에 대응합니다.
///
/// 리뷰 목록 스냅샷(`subject_review_versions.reviews`)에도 이 구조체가 그대로 직렬화됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    /// 리뷰 고유 식별자 (UUIDv7)
    pub id: String,
    /// 리뷰가 달린 과목 코드
    pub subject_id: String,
    pub review_text: String,
    /// 별점 (1~5)
    pub stars: i64,
    /// 작성자 표시 이름 — None이면 익명 리뷰
    pub user_name: Option<String>,
    /// 작성자 사용자 ID. 수정은 이 사용자만 할 수 있습니다.
    pub user_id: String,
    pub created_at: String,
}

/// 리뷰 작성 요청 — `POST /api/subjects/{subjectId}/reviews`
///
/// 모든 필드를 Option으로 받아 핸들러에서 직접 검증합니다.
/// 필드가 빠졌을 때 Axum의 422 대신 고정 메시지의 400을 돌려주기 위함입니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub review_text: Option<String>,
    pub stars: Option<i64>,
}

/// 리뷰 수정 요청 — `PATCH /api/reviews/{reviewId}`
///
/// `reviewText`와 `stars` 중 보낸 것만 바뀝니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewRequest {
    pub user_id: Option<String>,
    pub review_text: Option<String>,
    pub stars: Option<i64>,
}

/// 리뷰 삭제 요청 — `DELETE /api/reviews/{reviewId}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReviewRequest {
    pub user_id: Option<String>,
}
