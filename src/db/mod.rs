//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `history`: 세 버전 로그를 합친 통합 이력 쿼리
//! - `reviews`: 리뷰 작성/수정/삭제 (리뷰 목록 버전 기록과 한 트랜잭션)
//! - `subjects`: 과목 조회와 조회수 증가
//! - `users`: 사용자 조회
//! - `versions`: 학과/과목/리뷰 목록 버전 기록과 조회

pub mod history;
pub mod reviews;
pub mod subjects;
pub mod users;
pub mod versions;

// 하위 모듈의 모든 공개 함수를 재공개(re-export)하여
// `crate::db::record_field_version`처럼 바로 접근할 수 있게 합니다.
pub use history::*;
pub use reviews::*;
pub use subjects::*;
pub use versions::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

/// SQLite 연결 풀을 만듭니다.
///
/// - `create_if_missing`: DB 파일이 없으면 새로 만듭니다.
/// - `foreign_keys`: SQLite는 외래키 검사가 기본으로 꺼져 있어 명시적으로 켭니다.
///   (과목 삭제 시 리뷰가 함께 지워지는 `ON DELETE CASCADE`에 필요)
/// - `busy_timeout`: 다른 연결이 쓰기 잠금을 잡고 있으면 바로 실패하지 않고 기다립니다.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// `./migrations` 폴더의 SQL 파일 중 아직 실행되지 않은 것을 순서대로 실행합니다.
/// sqlx::migrate!는 컴파일 타임에 마이그레이션 파일을 바이너리에 포함시킵니다.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// 버전 로그에 기록할 현재 시각 (ISO 8601, 밀리초, UTC)
///
/// 스키마의 `strftime('%Y-%m-%dT%H:%M:%fZ', 'now')` 기본값과 같은 형식이라
/// 문자열 비교만으로 시간순 정렬이 됩니다.
pub fn now_timestamp() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}
