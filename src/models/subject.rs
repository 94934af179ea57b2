use serde::Serialize;

/// 과목 — `subjects` 테이블 한 행에 대응합니다.
///
/// 과목의 생성/수정/삭제는 별도의 CRUD 서비스가 담당하고,
/// 이 서비스는 조회와 조회수 증가만 수행합니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Subject {
    /// 과목 코드 (예: "TDT4120")
    pub id: String,
    pub name: String,
    pub field_id: Option<i64>,
    pub level_id: Option<i64>,
    pub description: Option<String>,
    /// 조회수. 감소하지 않습니다.
    pub view_count: i64,
}
