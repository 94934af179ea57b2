//! # 버전 기록 라우트 핸들러
//!
//! 과목/학과 수정은 외부 CRUD 서비스가 먼저 처리하고,
//! 프론트엔드가 그 다음에 이 엔드포인트들을 따로 호출해 변경을 기록합니다.
//!
//! ## 엔드포인트
//! - `POST /api/fields/{field_id}/version`           → `{ "version": n }`
//! - `GET  /api/fields/{field_id}/versions`          → 학과 버전 목록
//! - `POST /api/subjects/{subject_id}/version`       → `{ "message", "version" }`
//! - `GET  /api/subjects/{subject_id}/versions`      → 과목 버전 목록
//! - `POST /api/subjects/{subject_id}/reviews/version` → 201 `{ "message" }`
//! - `GET  /api/subjects/{subject_id}/reviews/versions` → 리뷰 목록 버전 목록
//! - `GET  /api/versions/{version_id}/subjects`      → 스냅샷의 과목 ID 배열

use crate::{
    db,
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
use serde_json::{json, Value};

pub async fn record_field_version(
    State(state): State<AppState>,
    field_id: Result<Path<i64>, PathRejection>,
    body: Result<Json<RecordFieldVersionRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let field_id = extract_path(field_id)?;
    let req = extract_json(body)?;
    let user_id = require(req.user_id, "userId is required")?;
    let description = req.description.unwrap_or_default();

    let version = db::record_field_version(&state.pool, field_id, &user_id, &description).await?;
    Ok(Json(json!({ "version": version })))
}

pub async fn list_field_versions(
    State(state): State<AppState>,
    field_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<PageVersion>>, AppError> {
    let field_id = extract_path(field_id)?;
    let versions = db::list_field_versions(&state.pool, field_id).await?;
    Ok(Json(versions))
}

pub async fn record_subject_version(
    State(state): State<AppState>,
    subject_id: Result<Path<String>, PathRejection>,
    body: Result<Json<RecordSubjectVersionRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let subject_id = extract_path(subject_id)?;
    let req = extract_json(body)?;
    let user_id = require(req.user_id, "userId and actionType are required")?;
    let tag = require(req.action_type, "userId and actionType are required")?;
    let action = SubjectAction::from_tag(&tag)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown actionType: {}", tag)))?;
    let description = req.description.unwrap_or_default();

    let version =
        db::record_subject_version(&state.pool, &subject_id, &user_id, action, &description).await?;
    Ok(Json(json!({
        "message": "Subject version recorded",
        "version": version,
    })))
}

pub async fn list_subject_versions(
    State(state): State<AppState>,
    subject_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<SubjectVersion>>, AppError> {
    let subject_id = extract_path(subject_id)?;
    let versions = db::list_subject_versions(&state.pool, &subject_id).await?;
    Ok(Json(versions))
}

/// 클라이언트가 보낸 리뷰 목록을 그대로 스냅샷으로 남깁니다. 빈 목록도 기록합니다.
pub async fn record_review_version(
    State(state): State<AppState>,
    subject_id: Result<Path<String>, PathRejection>,
    body: Result<Json<RecordReviewVersionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let subject_id = extract_path(subject_id)?;
    let req = extract_json(body)?;
    let user_id = require(req.user_id, "userId and actionType are required")?;
    let tag = require(req.action_type, "userId and actionType are required")?;
    let action = ReviewAction::from_tag(&tag)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown actionType: {}", tag)))?;

    db::record_review_version(&state.pool, &subject_id, &req.reviews, &user_id, action).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Review version recorded" })),
    ))
}

pub async fn list_review_versions(
    State(state): State<AppState>,
    subject_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<SubjectReviewVersion>>, AppError> {
    let subject_id = extract_path(subject_id)?;
    let versions = db::list_review_versions(&state.pool, &subject_id).await?;
    Ok(Json(versions))
}

/// 학과 버전 하나에 기록된 과목 ID 목록
pub async fn get_version_subjects(
    State(state): State<AppState>,
    version_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<String>>, AppError> {
    let version_id = extract_path(version_id)?;
    let version = db::get_field_version(&state.pool, &version_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Version not found".to_string()))?;

    Ok(Json(version.subject_ids.0))
}
