//! # studyrate 웹 서버 진입점
//!
//! 강의 리뷰 서비스의 변경 이력(버전) 백엔드입니다.
//! 학과/과목/리뷰 목록의 버전을 기록하고, 세 로그를 합친 통합 이력을 제공합니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. API 라우터 설정
//! 6. HTTP 서버 시작

// ── 모듈 선언 ──
// Rust에서는 파일 시스템 구조가 곧 모듈 구조입니다.
mod config;
mod db;
mod error;
mod extractors;
mod models;
mod routes;

use anyhow::Result; // anyhow::Result: 어떤 에러 타입이든 담을 수 있는 범용 Result 타입
use axum::Router;
use config::Config;
use routes::AppState;
use tower_http::{
    cors::{Any, CorsLayer}, // CORS(Cross-Origin Resource Sharing) 설정
    trace::TraceLayer,      // HTTP 요청/응답 로깅 미들웨어
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// #[tokio::main]: 비동기 런타임을 시작하는 어트리뷰트 매크로
#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .ok(): .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 studyrate, tower_http, axum 모듈을 debug 레벨로 설정합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studyrate=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting studyrate server on {}:{}", config.host, config.port);
    if config.moderator_user_id.is_none() {
        tracing::warn!("MODERATOR_USER_ID is not set; only authors can delete reviews");
    }

    // ── 4단계: SQLite 연결 풀 생성 ──
    // 연결 풀은 프로세스 전체에서 공유하는 유일한 자원입니다.
    let pool = db::connect(&config.database_url, config.max_connections).await?;

    // ── 5단계: 데이터베이스 마이그레이션 실행 ──
    tracing::info!("Running database migrations...");
    db::migrate(&pool).await?;

    // ── 6단계: 애플리케이션 상태(State) 생성 ──
    let state = AppState {
        pool,
        moderator_user_id: config.moderator_user_id.clone(),
    };

    // ── 7단계: 라우터와 미들웨어 ──
    // 프론트엔드(SPA)가 다른 출처에서 호출하므로 CORS를 모두 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // .nest(): API 라우트를 /api 경로 아래에 중첩시킵니다.
    // 예: /history → /api/history
    let app = Router::new()
        .nest("/api", routes::api_router(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // ── 8단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
