//! # 요청 추출 헬퍼
//!
//! Axum의 `Json`/`Path` 추출기가 실패하면 핸들러가 실행되기 전에
//! 일반 텍스트 응답(400/415/422)을 돌려줍니다.
//! 핸들러가 `Result<Json<T>, JsonRejection>`처럼 거절 결과를 직접 받고
//! 아래 헬퍼로 `AppError::BadRequest`로 바꾸면, 모든 에러가
//! `{ "error": ..., "code": "bad_request" }` JSON 본문으로 나갑니다.
//!
//! ```ignore
//! async fn handler(
//!     path: Result<Path<i64>, PathRejection>,
//!     body: Result<Json<Req>, JsonRejection>,
//! ) -> Result<..., AppError> {
//!     let field_id = extract_path(path)?;
//!     let req = extract_json(body)?;
//! }
//! ```

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    Json,
};

use crate::error::AppError;

/// JSON 본문을 꺼냅니다. 본문 누락, Content-Type 누락, 문법 오류, 타입 불일치 모두 400.
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// 경로 파라미터를 꺼냅니다. 숫자 ID 자리에 문자가 오는 등 파싱 실패는 400.
pub fn extract_path<T>(result: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    result
        .map(|Path(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}
