use serde::Serialize;

/// 사용자 — 회원가입/로그인은 외부 서비스가 처리하므로 표시 이름만 다룹니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub created_at: String,
}
