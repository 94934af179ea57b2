//! # 통합 변경 이력 쿼리
//!
//! 세 버전 로그(`page_versions`, `subject_versions`, `subject_review_versions`)를
//! `UNION ALL`로 합쳐 하나의 시간 역순 피드로 만듭니다.
//!
//! - 각 로그는 `users`와 LEFT JOIN하여 작성자 표시 이름을 붙입니다.
//!   (사용자가 삭제되어도 이력 줄은 사라지지 않고 이름만 NULL이 됩니다)
//! - 학과 버전의 동작 태그는 저장된 값이 없으므로 항상 `"added"`입니다.
//! - 리뷰 목록 버전은 번호가 없어 `version_number`가 NULL입니다.
//! - 페이지네이션과 필터링은 없습니다. 호출할 때마다 전체 이력을 반환합니다.

use crate::error::AppError;
use crate::models::HistoryEntry;
use sqlx::SqlitePool;

pub async fn get_history(pool: &SqlitePool) -> Result<Vec<HistoryEntry>, AppError> {
    let entries = sqlx::query_as::<_, HistoryEntry>(
        r#"
        SELECT pv.version_number AS version_number,
               pv.created_at     AS timestamp,
               u.username        AS user_name,
               'added'           AS action_type,
               'field'           AS kind,
               CAST(pv.field_id AS TEXT) AS target_id,
               pv.id             AS entry_id
        FROM page_versions pv
        LEFT JOIN users u ON u.id = pv.user_id

        UNION ALL

        SELECT sv.version_number, sv.created_at, u.username, sv.action_type, 'subject', sv.subject_id, sv.id
        FROM subject_versions sv
        LEFT JOIN users u ON u.id = sv.user_id

        UNION ALL

        SELECT NULL, rv.created_at, u.username, rv.action_type, 'review', rv.subject_id, rv.id
        FROM subject_review_versions rv
        LEFT JOIN users u ON u.id = rv.user_id

        ORDER BY timestamp DESC, entry_id DESC
        "#,
        // ↑ 복합 SELECT의 ORDER BY는 첫 번째 SELECT의 별칭을 기준으로 합니다.
        //   ISO 8601 문자열은 사전순 비교가 곧 시간순 비교입니다.
        //   같은 밀리초에 기록된 행은 UUIDv7 ID(생성순)로 순서를 정합니다.
        //   entry_id는 HistoryEntry에 없는 컬럼이라 FromRow가 무시합니다.
    )
    .fetch_all(pool)
    .await?;

    Ok(entries)
}
