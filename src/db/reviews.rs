//! # 리뷰 쿼리 모듈
//!
//! 리뷰 작성/수정/삭제와, 그 변경을 남기는 리뷰 목록 버전 기록을
//! **하나의 트랜잭션**으로 묶습니다. 리뷰는 바뀌었는데 이력이 빠지는 일이 없도록,
//! 둘 중 하나라도 실패하면 전부 롤백됩니다.
//!
//! 권한 검사(작성자/모더레이터)는 라우트 핸들러가 하고,
//! 이 모듈의 UPDATE는 `user_id` 조건을 한 번 더 걸어 둡니다.

use crate::error::AppError;
use crate::models::{ReviewAction, Review};
use sqlx::{Executor, Sqlite, SqlitePool};

use super::{now_timestamp, record_review_version};

/// 과목의 리뷰 목록을 최신순으로 조회합니다.
///
/// 트랜잭션 안에서 스냅샷을 뜰 때도 쓰므로 `Executor`를 제네릭으로 받습니다.
pub async fn list_reviews<'e, E>(executor: E, subject_id: &str) -> Result<Vec<Review>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let reviews = sqlx::query_as::<_, Review>(
        r#"
        SELECT id, subject_id, review_text, stars, user_name, user_id, created_at
        FROM reviews
        WHERE subject_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(subject_id)
    .fetch_all(executor)
    .await?;

    Ok(reviews)
}

pub async fn get_review<'e, E>(executor: E, id: &str) -> Result<Option<Review>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let review = sqlx::query_as::<_, Review>(
        r#"
        SELECT id, subject_id, review_text, stars, user_name, user_id, created_at
        FROM reviews
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(review)
}

/// 새 리뷰를 저장하고 `"commented on"` 리뷰 목록 버전을 함께 기록합니다.
pub async fn create_review(
    pool: &SqlitePool,
    subject_id: &str,
    user_id: &str,
    user_name: Option<&str>,
    review_text: &str,
    stars: i64,
) -> Result<Review, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    // pool.begin(): 트랜잭션 시작. commit() 전에 함수가 에러로 빠져나가면
    // tx가 drop되면서 자동으로 롤백됩니다.
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO reviews (id, subject_id, review_text, stars, user_name, user_id, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(subject_id)
    .bind(review_text)
    .bind(stars)
    .bind(user_name)
    .bind(user_id)
    .bind(now_timestamp())
    .execute(&mut *tx)
    .await?;

    let review = get_review(&mut *tx, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created review".to_string()))?;

    let snapshot = list_reviews(&mut *tx, subject_id).await?;
    record_review_version(&mut *tx, subject_id, &snapshot, user_id, ReviewAction::CommentedOn).await?;

    tx.commit().await?;
    Ok(review)
}

/// 리뷰 본문과 별점을 바꾸고 `"edited a comment on"` 버전을 기록합니다.
///
/// 작성자(`user_id`)가 다르거나 그 사이 리뷰가 지워졌으면 `Ok(None)`.
pub async fn update_review(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
    review_text: &str,
    stars: i64,
) -> Result<Option<Review>, AppError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("UPDATE reviews SET review_text = ?, stars = ? WHERE id = ? AND user_id = ?")
        .bind(review_text)
        .bind(stars)
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let review = get_review(&mut *tx, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve updated review".to_string()))?;

    let snapshot = list_reviews(&mut *tx, &review.subject_id).await?;
    record_review_version(
        &mut *tx,
        &review.subject_id,
        &snapshot,
        user_id,
        ReviewAction::EditedCommentOn,
    )
    .await?;

    tx.commit().await?;
    Ok(Some(review))
}

/// 리뷰를 지우고, 남은 목록으로 `"deleted a comment on"` 버전을 기록합니다.
///
/// `acting_user_id`는 작성자 본인이거나 모더레이터입니다. 이력에는 실제로 지운 사람이 남습니다.
///
/// # 반환값
/// - `Ok(true)`: 삭제 성공
/// - `Ok(false)`: 이미 지워진 리뷰
pub async fn delete_review(
    pool: &SqlitePool,
    review: &Review,
    acting_user_id: &str,
) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
        .bind(&review.id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Ok(false);
    }

    let snapshot = list_reviews(&mut *tx, &review.subject_id).await?;
    record_review_version(
        &mut *tx,
        &review.subject_id,
        &snapshot,
        acting_user_id,
        ReviewAction::DeletedCommentOn,
    )
    .await?;

    tx.commit().await?;
    Ok(true)
}
