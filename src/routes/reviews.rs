//! # 리뷰 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/subjects/{subject_id}/reviews | `list_reviews` | 과목의 리뷰 목록 |
//! | POST | /api/subjects/{subject_id}/reviews | `create_review` | 리뷰 작성 |
//! | PATCH | /api/reviews/{review_id} | `update_review` | 리뷰 수정 (작성자만) |
//! | DELETE | /api/reviews/{review_id} | `delete_review` | 리뷰 삭제 (작성자 또는 모더레이터) |
//!
//! 작성/수정/삭제는 각각 리뷰 목록 버전을 같은 트랜잭션 안에서 남기므로,
//! 프론트엔드가 `/reviews/version`을 따로 호출할 필요가 없습니다.

use crate::{
    db::{self, users as db_users},
    error::AppError,
    extractors::{extract_json, extract_path},
    models::*,
    routes::{require, AppState},
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

/// 별점은 1~5 사이의 정수만 허용합니다.
fn validate_stars(stars: i64) -> Result<i64, AppError> {
    if (1..=5).contains(&stars) {
        Ok(stars)
    } else {
        Err(AppError::BadRequest("Stars must be between 1 and 5".to_string()))
    }
}

pub async fn list_reviews(
    State(state): State<AppState>,
    subject_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Review>>, AppError> {
    let subject_id = extract_path(subject_id)?;
    let reviews = db::list_reviews(&state.pool, &subject_id).await?;
    Ok(Json(reviews))
}

/// `POST /api/subjects/{subject_id}/reviews`
/// + `{ "userId": "...", "userName": "Ola" | null, "reviewText": "...", "stars": 4 }`
///
/// `userName`을 비우면 익명 리뷰가 됩니다.
pub async fn create_review(
    State(state): State<AppState>,
    subject_id: Result<Path<String>, PathRejection>,
    body: Result<Json<CreateReviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let subject_id = extract_path(subject_id)?;
    let req = extract_json(body)?;
    let user_id = require(req.user_id, "userId is required")?;
    let review_text = require(req.review_text, "reviewText is required")?;
    let stars = validate_stars(
        req.stars
            .ok_or_else(|| AppError::BadRequest("stars is required".to_string()))?,
    )?;
    // 공백뿐인 이름은 익명으로 취급합니다.
    let user_name = req
        .user_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    db::get_subject(&state.pool, &subject_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Subject not found".to_string()))?;
    db_users::find_by_id(&state.pool, &user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let review = db::create_review(
        &state.pool,
        &subject_id,
        &user_id,
        user_name.as_deref(),
        &review_text,
        stars,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// `PATCH /api/reviews/{review_id}` — 보낸 필드만 바꿉니다.
pub async fn update_review(
    State(state): State<AppState>,
    review_id: Result<Path<String>, PathRejection>,
    body: Result<Json<UpdateReviewRequest>, JsonRejection>,
) -> Result<Json<Review>, AppError> {
    let review_id = extract_path(review_id)?;
    let req = extract_json(body)?;
    let user_id = require(req.user_id, "userId is required")?;
    if req.review_text.is_none() && req.stars.is_none() {
        return Err(AppError::BadRequest(
            "Nothing to update: send reviewText or stars".to_string(),
        ));
    }

    let existing = db::get_review(&state.pool, &review_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;
    if existing.user_id != user_id {
        return Err(AppError::Forbidden(
            "Only the author can edit this review".to_string(),
        ));
    }

    let review_text = match req.review_text {
        Some(text) => require(Some(text), "reviewText must not be empty")?,
        None => existing.review_text,
    };
    let stars = match req.stars {
        Some(stars) => validate_stars(stars)?,
        None => existing.stars,
    };

    let review = db::update_review(&state.pool, &review_id, &user_id, &review_text, stars)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;
    Ok(Json(review))
}

/// `DELETE /api/reviews/{review_id}` + `{ "userId": "..." }`
///
/// 작성자 본인 또는 모더레이터만 삭제할 수 있습니다. 성공하면 204 No Content.
pub async fn delete_review(
    State(state): State<AppState>,
    review_id: Result<Path<String>, PathRejection>,
    body: Result<Json<DeleteReviewRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let review_id = extract_path(review_id)?;
    let req = extract_json(body)?;
    let user_id = require(req.user_id, "userId is required")?;

    let review = db::get_review(&state.pool, &review_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;
    if review.user_id != user_id && !state.is_moderator(&user_id) {
        return Err(AppError::Forbidden(
            "Only the author or a moderator can delete this review".to_string(),
        ));
    }

    if !db::delete_review(&state.pool, &review, &user_id).await? {
        return Err(AppError::NotFound("Review not found".to_string()));
    }

    tracing::info!(review_id = %review.id, subject_id = %review.subject_id, user_id = %user_id, "Review deleted");
    Ok(StatusCode::NO_CONTENT)
}
