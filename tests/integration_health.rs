mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{send, setup_test_app};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_health_reports_database(pool: PgPool) {
    let (status, body) = send(&pool, "GET", "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_health_degraded_when_pool_closed(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    pool.close().await;

    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_request_id_is_propagated(pool: PgPool) {
    let app = setup_test_app(pool);

    let request = Request::builder()
        .uri("/api/health")
        .header("x-request-id", "test-request-42")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "test-request-42"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_request_id_is_generated(pool: PgPool) {
    let app = setup_test_app(pool);

    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_openapi_document_served(pool: PgPool) {
    let (status, body) = send(&pool, "GET", "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Bahrululum API");
    assert!(body["paths"]["/api/courses"].is_object());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_route_is_404(pool: PgPool) {
    let (status, _) = send(&pool, "GET", "/api/does-not-exist", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
