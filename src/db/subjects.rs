//! # 과목 쿼리 모듈
//!
//! 과목 CRUD는 외부 서비스 담당이라, 여기에는 조회와 조회수 증가만 있습니다.

use crate::error::AppError;
use crate::models::Subject;
use sqlx::SqlitePool;

/// 과목 코드로 과목 하나를 조회합니다.
pub async fn get_subject(pool: &SqlitePool, id: &str) -> Result<Option<Subject>, AppError> {
    let subject = sqlx::query_as::<_, Subject>(
        r#"
        SELECT id, name, field_id, level_id, description, view_count
        FROM subjects
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(subject)
}

/// 과목 조회수를 1 올립니다.
///
/// `view_count = view_count + 1`은 단일 UPDATE 문이라 SQLite가 원자적으로 처리합니다.
/// 동시에 N번 호출되면 정확히 N만큼 증가하므로 애플리케이션 수준의 잠금은 필요 없습니다.
///
/// # 반환값
/// - `Ok(true)`: 증가 성공
/// - `Ok(false)`: 해당 코드의 과목이 없음 (0행 영향)
pub async fn increment_view(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("UPDATE subjects SET view_count = view_count + 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
