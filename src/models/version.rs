//! # 버전(변경 이력) 모델 정의
//!
//! 세 종류의 버전 로그가 있습니다:
//! - `PageVersion`: 학과(field) 페이지 버전. 학과별 번호와 소속 과목 ID 스냅샷을 가집니다.
//! - `SubjectVersion`: 과목 버전. 과목별 번호와 동작 태그("edited", "deleted")를 가집니다.
//! - `SubjectReviewVersion`: 과목 리뷰 목록 스냅샷. 번호 없이 쌓이기만 합니다.
//!
//! 세 로그 모두 추가만 되고(append-only) 수정되거나 삭제되지 않습니다.
//! `HistoryEntry`는 세 로그를 시간순으로 합친 통합 이력의 한 줄입니다.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// 학과 페이지 버전 — `page_versions` 테이블 한 행
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PageVersion {
    pub id: String,
    pub field_id: i64,
    /// 학과 단위로 1부터 빈틈없이 증가하는 번호
    pub version_number: i64,
    pub user_id: String,
    /// 기록 시점에 학과에 속해 있던 과목 ID 목록 (DB에는 JSON 배열 문자열)
    pub subject_ids: Json<Vec<String>>,
    pub description: String,
    pub created_at: String,
}

/// 과목 버전 — `subject_versions` 테이블 한 행
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SubjectVersion {
    pub id: String,
    pub subject_id: String,
    pub version_number: i64,
    pub user_id: String,
    pub action_type: String,
    pub description: String,
    pub created_at: String,
}

/// 과목 리뷰 목록 버전 — `subject_review_versions` 테이블 한 행
///
/// `reviews`는 기록 시점의 리뷰 목록 전체입니다.
/// 클라이언트가 보낸 목록을 그대로 저장하므로 구조를 강제하지 않습니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SubjectReviewVersion {
    pub id: String,
    pub subject_id: String,
    pub reviews: Json<Vec<serde_json::Value>>,
    pub user_id: String,
    pub action_type: String,
    pub created_at: String,
}

/// 통합 이력 피드의 한 항목 — `GET /api/history`
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct HistoryEntry {
    /// 리뷰 목록 버전은 번호가 없으므로 None
    pub version_number: Option<i64>,
    pub timestamp: String,
    /// 작성자 표시 이름. users 테이블에 없는 사용자면 None
    pub user_name: Option<String>,
    /// 학과 버전은 항상 "added"
    pub action_type: String,
    /// "field" | "subject" | "review"
    pub kind: String,
    /// 학과 ID(문자열로 변환) 또는 과목 코드
    pub target_id: String,
}

// ── 동작(action) 태그 ──
// DB에는 사람이 읽는 문자열 그대로 저장하지만,
// API 경계에서는 닫힌 열거형으로 받아 알 수 없는 값을 400으로 거절합니다.

/// 과목 버전의 동작 태그
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectAction {
    Added,
    Edited,
    Deleted,
}

impl SubjectAction {
    pub fn as_str(self) -> &'static str {
        match self {
            SubjectAction::Added => "added",
            SubjectAction::Edited => "edited",
            SubjectAction::Deleted => "deleted",
        }
    }

    /// 저장된 문자열 태그를 열거형으로 바꿉니다. 모르는 태그면 None.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "added" => Some(SubjectAction::Added),
            "edited" => Some(SubjectAction::Edited),
            "deleted" => Some(SubjectAction::Deleted),
            _ => None,
        }
    }
}

/// 리뷰 목록 버전의 동작 태그
///
/// 이력 화면에서 "홍길동 commented on TDT4120"처럼 문장으로 이어 붙여 보여줍니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    CommentedOn,
    EditedCommentOn,
    DeletedCommentOn,
}

impl ReviewAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewAction::CommentedOn => "commented on",
            ReviewAction::EditedCommentOn => "edited a comment on",
            ReviewAction::DeletedCommentOn => "deleted a comment on",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "commented on" => Some(ReviewAction::CommentedOn),
            "edited a comment on" => Some(ReviewAction::EditedCommentOn),
            "deleted a comment on" => Some(ReviewAction::DeletedCommentOn),
            _ => None,
        }
    }
}

// ── 요청 본문 ──
// 필수 값도 Option으로 받고 핸들러에서 검증합니다. (누락 시 400 + 고정 메시지)

/// `POST /api/fields/{fieldId}/version`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFieldVersionRequest {
    pub user_id: Option<String>,
    pub description: Option<String>,
}

/// `POST /api/subjects/{subjectId}/version`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSubjectVersionRequest {
    pub user_id: Option<String>,
    pub action_type: Option<String>,
    pub description: Option<String>,
}

/// `POST /api/subjects/{subjectId}/reviews/version`
///
/// `reviews`가 빠지면 빈 목록으로 기록합니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordReviewVersionRequest {
    pub user_id: Option<String>,
    pub action_type: Option<String>,
    #[serde(default)]
    pub reviews: Vec<serde_json::Value>,
}
