//! 실제 라우터에 `oneshot`으로 요청을 보내는 HTTP 테스트

use axum::{
    body::Body,
    http::{Method, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

use crate::db::testing;
use crate::routes::{api_router, AppState};

const MODERATOR: &str = "moderator";

async fn setup() -> (SqlitePool, Router) {
    let pool = testing::pool().await;
    testing::seed_user(&pool, "user1", "Ola").await;
    testing::seed_user(&pool, "user2", "Kari").await;
    testing::seed_user(&pool, MODERATOR, "Mod").await;
    testing::seed_field(&pool, 101, "Computer Science").await;
    testing::seed_subject(&pool, "TDT4120", 101).await;
    testing::seed_subject(&pool, "TDT4100", 101).await;

    let state = AppState {
        pool: pool.clone(),
        moderator_user_id: Some(MODERATOR.to_string()),
    };
    let app = Router::new().nest("/api", api_router(state));
    (pool, app)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ── 학과 버전 ──

#[tokio::test]
async fn record_field_version_returns_next_number() {
    let (_pool, app) = setup().await;

    let res = send(
        &app,
        Method::POST,
        "/api/fields/101/version",
        Some(json!({ "userId": "user1", "description": "initial" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!({ "version": 1 }));

    let res = send(
        &app,
        Method::POST,
        "/api/fields/101/version",
        Some(json!({ "userId": "user1" })),
    )
    .await;
    assert_eq!(body_json(res).await["version"], 2);

    let res = send(&app, Method::GET, "/api/fields/101/versions", None).await;
    let versions = body_json(res).await;
    assert_eq!(versions.as_array().unwrap().len(), 2);
    assert_eq!(versions[0]["version_number"], 2);
    assert_eq!(versions[1]["description"], "initial");
}

#[tokio::test]
async fn record_field_version_requires_user() {
    let (_pool, app) = setup().await;

    let res = send(
        &app,
        Method::POST,
        "/api/fields/101/version",
        Some(json!({ "description": "no user" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await["error"], "userId is required");

    let res = send(
        &app,
        Method::POST,
        "/api/fields/101/version",
        Some(json!({ "userId": "   " })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

async fn send_raw(app: &Router, uri: &str, content_type: Option<&str>, body: &str) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn assert_json_bad_request(response: Response<Body>) {
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "bad_request");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_json_is_a_json_400() {
    let (_pool, app) = setup().await;
    let res = send_raw(&app, "/api/fields/101/version", Some("application/json"), "{not json").await;
    assert_json_bad_request(res).await;
}

#[tokio::test]
async fn missing_body_is_a_json_400() {
    let (_pool, app) = setup().await;
    let res = send_raw(&app, "/api/fields/101/version", None, "").await;
    assert_json_bad_request(res).await;

    let res = send(&app, Method::DELETE, "/api/reviews/some-review", None).await;
    assert_json_bad_request(res).await;
}

#[tokio::test]
async fn wrongly_typed_field_is_a_json_400() {
    let (pool, app) = setup().await;
    let res = send(
        &app,
        Method::POST,
        "/api/subjects/TDT4120/version",
        Some(json!({ "userId": 5, "actionType": "edited" })),
    )
    .await;
    assert_json_bad_request(res).await;
    assert!(crate::db::list_subject_versions(&pool, "TDT4120").await.unwrap().is_empty());
}

#[tokio::test]
async fn non_numeric_field_id_is_a_json_400() {
    let (_pool, app) = setup().await;
    let res = send(
        &app,
        Method::POST,
        "/api/fields/abc/version",
        Some(json!({ "userId": "user1" })),
    )
    .await;
    assert_json_bad_request(res).await;

    let res = send(&app, Method::GET, "/api/fields/abc/versions", None).await;
    assert_json_bad_request(res).await;
}

#[tokio::test]
async fn version_subjects_lists_snapshot() {
    let (pool, app) = setup().await;
    send(
        &app,
        Method::POST,
        "/api/fields/101/version",
        Some(json!({ "userId": "user1" })),
    )
    .await;

    let versions = crate::db::list_field_versions(&pool, 101).await.unwrap();
    let uri = format!("/api/versions/{}/subjects", versions[0].id);
    let res = send(&app, Method::GET, &uri, None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let mut ids: Vec<String> = serde_json::from_value(body_json(res).await).unwrap();
    ids.sort();
    assert_eq!(ids, vec!["TDT4100", "TDT4120"]);

    let res = send(&app, Method::GET, "/api/versions/unknown/subjects", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

// ── 과목 버전 ──

#[tokio::test]
async fn record_subject_version_increments() {
    let (_pool, app) = setup().await;
    let body = json!({ "userId": "user1", "actionType": "edited", "description": "first" });
    let res = send(&app, Method::POST, "/api/subjects/TDT4120/version", Some(body)).await;
    assert_eq!(body_json(res).await["version"], 1);

    let body = json!({ "userId": "user2", "actionType": "edited", "description": "changed level" });
    let res = send(&app, Method::POST, "/api/subjects/TDT4120/version", Some(body)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["version"], 2);
    assert_eq!(json["message"], "Subject version recorded");

    let res = send(&app, Method::GET, "/api/subjects/TDT4120/versions", None).await;
    let versions = body_json(res).await;
    assert_eq!(versions[0]["action_type"], "edited");
    assert_eq!(versions[0]["description"], "changed level");
}

#[tokio::test]
async fn record_subject_version_validates_action_type() {
    let (_pool, app) = setup().await;

    let res = send(
        &app,
        Method::POST,
        "/api/subjects/TDT4120/version",
        Some(json!({ "userId": "user1" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(
        &app,
        Method::POST,
        "/api/subjects/TDT4120/version",
        Some(json!({ "userId": "user1", "actionType": "renamed" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await["error"], "Unknown actionType: renamed");
}

// ── 리뷰 목록 버전 ──

#[tokio::test]
async fn record_review_version_accepts_empty_list() {
    let (_pool, app) = setup().await;

    let res = send(
        &app,
        Method::POST,
        "/api/subjects/TDT4120/reviews/version",
        Some(json!({ "userId": "user1", "actionType": "deleted a comment on", "reviews": [] })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(body_json(res).await["message"], "Review version recorded");

    let res = send(&app, Method::GET, "/api/subjects/TDT4120/reviews/versions", None).await;
    let versions = body_json(res).await;
    assert_eq!(versions[0]["reviews"], json!([]));
}

#[tokio::test]
async fn record_review_version_rejects_unknown_action() {
    let (_pool, app) = setup().await;
    let res = send(
        &app,
        Method::POST,
        "/api/subjects/TDT4120/reviews/version",
        Some(json!({ "userId": "user1", "actionType": "liked", "reviews": [] })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

// ── 통합 이력 ──

#[tokio::test]
async fn history_lists_everything_newest_first() {
    let (pool, app) = setup().await;
    send(
        &app,
        Method::POST,
        "/api/fields/101/version",
        Some(json!({ "userId": "user1" })),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/api/subjects/TDT4120/version",
        Some(json!({ "userId": "user2", "actionType": "deleted" })),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/api/subjects/TDT4120/reviews/version",
        Some(json!({ "userId": "user1", "actionType": "commented on" })),
    )
    .await;

    for (table, ts) in [
        ("page_versions", "2025-03-01T10:00:00.000Z"),
        ("subject_versions", "2025-03-01T10:05:00.000Z"),
        ("subject_review_versions", "2025-03-01T09:00:00.000Z"),
    ] {
        sqlx::query(&format!("UPDATE {table} SET created_at = ?"))
            .bind(ts)
            .execute(&pool)
            .await
            .unwrap();
    }

    let res = send(&app, Method::GET, "/api/history", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let history = body_json(res).await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 3);

    assert_eq!(history[0]["action_type"], "deleted");
    assert_eq!(history[0]["user_name"], "Kari");
    assert_eq!(history[0]["version_number"], 1);
    assert_eq!(history[1]["action_type"], "added");
    assert_eq!(history[1]["timestamp"], "2025-03-01T10:00:00.000Z");
    assert_eq!(history[2]["action_type"], "commented on");
    assert_eq!(history[2]["version_number"], Value::Null);
}

// ── 조회수 ──

#[tokio::test]
async fn increment_view_bumps_counter() {
    let (pool, app) = setup().await;

    let res = send(&app, Method::POST, "/api/subjects/TDT4120/increment-view", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["message"], "View count updated");

    let subject = crate::db::get_subject(&pool, "TDT4120").await.unwrap().unwrap();
    assert_eq!(subject.view_count, 1);
}

#[tokio::test]
async fn increment_view_unknown_subject_is_404() {
    let (_pool, app) = setup().await;
    let res = send(&app, Method::POST, "/api/subjects/NOPE0000/increment-view", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await["error"], "Subject not found");
}

#[tokio::test]
async fn increment_view_blank_id_is_400() {
    let (_pool, app) = setup().await;
    let res = send(&app, Method::POST, "/api/subjects/%20/increment-view", None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await["error"], "Subject id is required");
}

// ── 리뷰 ──

async fn post_review(app: &Router, user_id: &str, stars: i64) -> Value {
    let res = send(
        app,
        Method::POST,
        "/api/subjects/TDT4120/reviews",
        Some(json!({ "userId": user_id, "userName": "Ola", "reviewText": "Solid course", "stars": stars })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    body_json(res).await
}

#[tokio::test]
async fn create_review_records_review_version() {
    let (_pool, app) = setup().await;
    let review = post_review(&app, "user1", 4).await;
    assert_eq!(review["stars"], 4);
    assert_eq!(review["subject_id"], "TDT4120");

    let res = send(&app, Method::GET, "/api/subjects/TDT4120/reviews/versions", None).await;
    let versions = body_json(res).await;
    assert_eq!(versions[0]["action_type"], "commented on");
    assert_eq!(versions[0]["reviews"][0]["id"], review["id"]);
}

#[tokio::test]
async fn create_review_validates_input() {
    let (_pool, app) = setup().await;

    let res = send(
        &app,
        Method::POST,
        "/api/subjects/TDT4120/reviews",
        Some(json!({ "userId": "user1", "reviewText": "x", "stars": 0 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(
        &app,
        Method::POST,
        "/api/subjects/TDT4120/reviews",
        Some(json!({ "userId": "user1", "stars": 3 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(
        &app,
        Method::POST,
        "/api/subjects/NOPE0000/reviews",
        Some(json!({ "userId": "user1", "reviewText": "x", "stars": 3 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_author_can_edit_review() {
    let (_pool, app) = setup().await;
    let review = post_review(&app, "user1", 3).await;
    let uri = format!("/api/reviews/{}", review["id"].as_str().unwrap());

    let res = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "userId": "user2", "stars": 1 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // 모더레이터도 수정은 할 수 없습니다.
    let res = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "userId": MODERATOR, "stars": 1 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "userId": "user1", "stars": 5 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = body_json(res).await;
    assert_eq!(updated["stars"], 5);
    assert_eq!(updated["review_text"], "Solid course");
}

#[tokio::test]
async fn moderator_can_delete_any_review() {
    let (_pool, app) = setup().await;
    let review = post_review(&app, "user1", 2).await;
    let uri = format!("/api/reviews/{}", review["id"].as_str().unwrap());

    let res = send(&app, Method::DELETE, &uri, Some(json!({ "userId": "user2" }))).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = send(&app, Method::DELETE, &uri, Some(json!({ "userId": MODERATOR }))).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = send(&app, Method::DELETE, &uri, Some(json!({ "userId": MODERATOR }))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(&app, Method::GET, "/api/subjects/TDT4120/reviews", None).await;
    assert_eq!(body_json(res).await, json!([]));

    let res = send(&app, Method::GET, "/api/history", None).await;
    let history = body_json(res).await;
    assert_eq!(history[0]["action_type"], "deleted a comment on");
    assert_eq!(history[0]["user_name"], "Mod");
}

#[tokio::test]
async fn health_reports_database() {
    let (_pool, app) = setup().await;
    let res = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!({ "status": "ok", "database": "ok" }));
}
