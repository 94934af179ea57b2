//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/health` → `{ "status": "ok", "database": "ok" }`
//!
//! DB에 `SELECT 1`을 보내 연결 풀이 살아 있는지도 함께 확인합니다.

use crate::routes::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// `GET /api/health` — 서버와 DB 상태를 확인합니다.
///
/// DB 확인이 실패해도 200으로 답하고 `"database": "unavailable"`만 바뀝니다.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::warn!("Health check database ping failed: {}", e);
            "unavailable"
        }
    };

    Json(json!({
        "status": "ok",
        "database": database,
    }))
}
