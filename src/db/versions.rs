use crate::error::AppError;
use crate::models::{PageVersion, ReviewAction, SubjectAction, SubjectReviewVersion, SubjectVersion};
use serde::Serialize;
use sqlx::{Executor, Sqlite, SqlitePool};

use super::now_timestamp;

/// 학과 페이지 버전을 기록하고 새 버전 번호를 반환합니다.
///
/// 번호 계산(MAX + 1), 소속 과목 ID 스냅샷, INSERT가 한 문장이라
/// 동시에 호출되어도 같은 번호가 두 번 나오지 않습니다.
/// (SQLite는 쓰기 문장을 직렬화하고, `UNIQUE(field_id, version_number)`가 한 번 더 막습니다)
pub async fn record_field_version(
    pool: &SqlitePool,
    field_id: i64,
    user_id: &str,
    description: &str,
) -> Result<i64, AppError> {
    let id = uuid::Uuid::now_v7().to_string();
    let version: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO page_versions (id, field_id, version_number, user_id, subject_ids, description, created_at)
        SELECT ?, ?, COALESCE(MAX(version_number), 0) + 1, ?,
               (SELECT json_group_array(id) FROM (SELECT id FROM subjects WHERE field_id = ? ORDER BY id)),
               ?, ?
        FROM page_versions
        WHERE field_id = ?
        RETURNING version_number
        "#,
    )
    .bind(&id)
    .bind(field_id)
    .bind(user_id)
    .bind(field_id)
    .bind(description)
    .bind(now_timestamp())
    .bind(field_id)
    .fetch_one(pool)
    .await?;

    tracing::info!(field_id, version, user_id, "Recorded field version");
    Ok(version)
}

/// 과목 버전을 기록하고 새 버전 번호를 반환합니다. 번호는 과목 코드 단위입니다.
pub async fn record_subject_version(
    pool: &SqlitePool,
    subject_id: &str,
    user_id: &str,
    action: SubjectAction,
    description: &str,
) -> Result<i64, AppError> {
    let id = uuid::Uuid::now_v7().to_string();
    let version: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO subject_versions (id, subject_id, version_number, user_id, action_type, description, created_at)
        SELECT ?, ?, COALESCE(MAX(version_number), 0) + 1, ?, ?, ?, ?
        FROM subject_versions
        WHERE subject_id = ?
        RETURNING version_number
        "#,
    )
    .bind(&id)
    .bind(subject_id)
    .bind(user_id)
    .bind(action.as_str())
    .bind(description)
    .bind(now_timestamp())
    .bind(subject_id)
    .fetch_one(pool)
    .await?;

    tracing::info!(subject_id, version, user_id, action = action.as_str(), "Recorded subject version");
    Ok(version)
}

/// 과목의 리뷰 목록 스냅샷을 기록합니다. 번호 없이 추가만 합니다.
///
/// `executor`로 풀(`&pool`)과 트랜잭션(`&mut *tx`) 모두 받을 수 있어,
/// 리뷰 작성/수정/삭제가 같은 트랜잭션 안에서 이력을 남길 때도 씁니다.
pub async fn record_review_version<'e, E, T>(
    executor: E,
    subject_id: &str,
    reviews: &[T],
    user_id: &str,
    action: ReviewAction,
) -> Result<(), AppError>
where
    E: Executor<'e, Database = Sqlite>,
    T: Serialize,
{
    let id = uuid::Uuid::now_v7().to_string();
    let snapshot = serde_json::to_string(reviews)?;

    sqlx::query(
        r#"
        INSERT INTO subject_review_versions (id, subject_id, reviews, user_id, action_type, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(subject_id)
    .bind(&snapshot)
    .bind(user_id)
    .bind(action.as_str())
    .bind(now_timestamp())
    .execute(executor)
    .await?;

    tracing::info!(
        subject_id,
        user_id,
        action = action.as_str(),
        reviews = reviews.len(),
        "Recorded review list version"
    );
    Ok(())
}

pub async fn list_field_versions(
    pool: &SqlitePool,
    field_id: i64,
) -> Result<Vec<PageVersion>, AppError> {
    let versions = sqlx::query_as::<_, PageVersion>(
        r#"
        SELECT id, field_id, version_number, user_id, subject_ids, description, created_at
        FROM page_versions
        WHERE field_id = ?
        ORDER BY version_number DESC
        "#,
    )
    .bind(field_id)
    .fetch_all(pool)
    .await?;

    Ok(versions)
}

pub async fn get_field_version(
    pool: &SqlitePool,
    version_id: &str,
) -> Result<Option<PageVersion>, AppError> {
    let version = sqlx::query_as::<_, PageVersion>(
        r#"
        SELECT id, field_id, version_number, user_id, subject_ids, description, created_at
        FROM page_versions
        WHERE id = ?
        "#,
    )
    .bind(version_id)
    .fetch_optional(pool)
    .await?;

    Ok(version)
}

pub async fn list_subject_versions(
    pool: &SqlitePool,
    subject_id: &str,
) -> Result<Vec<SubjectVersion>, AppError> {
    let versions = sqlx::query_as::<_, SubjectVersion>(
        r#"
        SELECT id, subject_id, version_number, user_id, action_type, description, created_at
        FROM subject_versions
        WHERE subject_id = ?
        ORDER BY version_number DESC
        "#,
    )
    .bind(subject_id)
    .fetch_all(pool)
    .await?;

    Ok(versions)
}

/// 리뷰 목록 버전은 번호가 없으므로 기록 시각(같으면 ID, UUIDv7이라 생성순) 역순으로 정렬합니다.
pub async fn list_review_versions(
    pool: &SqlitePool,
    subject_id: &str,
) -> Result<Vec<SubjectReviewVersion>, AppError> {
    let versions = sqlx::query_as::<_, SubjectReviewVersion>(
        r#"
        SELECT id, subject_id, reviews, user_id, action_type, created_at
        FROM subject_review_versions
        WHERE subject_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(subject_id)
    .fetch_all(pool)
    .await?;

    Ok(versions)
}
