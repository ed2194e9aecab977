mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Router, middleware};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use bahrululum::middleware::auth::require_auth;
use bahrululum::middleware::role::{
    CurrentUser, RequireAdmin, RequireMentorOrAdmin, require_admin, require_any_role,
    require_mentor, require_mentor_or_admin, require_user,
};
use bahrululum::state::AppState;
use bahrululum_config::CorsConfig;
use bahrululum_models::UserRole;
use common::{create_test_user, error_message, jwt_config, token_for};

async fn ok() -> &'static str {
    "ok"
}

async fn admin_guard(RequireAdmin(user): RequireAdmin) -> String {
    user.role
}

async fn mentor_or_admin_guard(RequireMentorOrAdmin(user): RequireMentorOrAdmin) -> String {
    user.role
}

async fn current(CurrentUser(user): CurrentUser) -> String {
    user.role
}

fn guarded_app(pool: PgPool) -> Router {
    let state = AppState::new(
        pool,
        jwt_config(),
        CorsConfig {
            allowed_origins: vec![],
        },
    );

    Router::new()
        .route(
            "/admin",
            get(ok).route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
        )
        .route(
            "/mentor",
            get(ok).route_layer(middleware::from_fn_with_state(state.clone(), require_mentor)),
        )
        .route(
            "/staff",
            get(ok).route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_mentor_or_admin,
            )),
        )
        .route(
            "/learner",
            get(ok).route_layer(middleware::from_fn_with_state(state.clone(), require_user)),
        )
        .route(
            "/anyone",
            get(current).route_layer(middleware::from_fn_with_state(state.clone(), require_any_role)),
        )
        .route("/guard/admin", get(admin_guard))
        .route("/guard/staff", get(mentor_or_admin_guard))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .route(
            "/no-auth",
            get(ok).route_layer(middleware::from_fn_with_state(state.clone(), require_any_role)),
        )
        .with_state(state)
}

async fn call(pool: &PgPool, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = guarded_app(pool.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    (status, body)
}

async fn token(pool: &PgPool, role: UserRole) -> String {
    token_for(create_test_user(pool, role).await.id)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_role_presets_allow_and_deny(pool: PgPool) {
    let admin = token(&pool, UserRole::Admin).await;
    let mentor = token(&pool, UserRole::Mentor).await;
    let user = token(&pool, UserRole::User).await;

    let cases = [
        ("/admin", &admin, StatusCode::OK),
        ("/admin", &mentor, StatusCode::FORBIDDEN),
        ("/admin", &user, StatusCode::FORBIDDEN),
        ("/mentor", &mentor, StatusCode::OK),
        ("/mentor", &admin, StatusCode::FORBIDDEN),
        ("/mentor", &user, StatusCode::FORBIDDEN),
        ("/staff", &mentor, StatusCode::OK),
        ("/staff", &admin, StatusCode::OK),
        ("/staff", &user, StatusCode::FORBIDDEN),
        ("/learner", &user, StatusCode::OK),
        ("/learner", &mentor, StatusCode::FORBIDDEN),
        ("/learner", &admin, StatusCode::FORBIDDEN),
    ];

    for (uri, token, expected) in cases {
        let (status, body) = call(&pool, uri, Some(token.as_str())).await;
        assert_eq!(status, expected, "{}", uri);
        if expected == StatusCode::FORBIDDEN {
            assert_eq!(error_message(&body), "Insufficient privileges");
        }
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_any_role_stores_current_user(pool: PgPool) {
    let mentor = token(&pool, UserRole::Mentor).await;

    let (status, body) = call(&pool, "/anyone", Some(&mentor)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "mentor");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_role_extractors(pool: PgPool) {
    let admin = token(&pool, UserRole::Admin).await;
    let mentor = token(&pool, UserRole::Mentor).await;
    let user = token(&pool, UserRole::User).await;

    let (status, body) = call(&pool, "/guard/admin", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "admin");

    let (status, body) = call(&pool, "/guard/admin", Some(&mentor)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_message(&body), "Insufficient privileges");

    let (status, body) = call(&pool, "/guard/staff", Some(&mentor)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "mentor");

    let (status, _) = call(&pool, "/guard/staff", Some(&user)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_role_check_without_authentication(pool: PgPool) {
    let (status, body) = call(&pool, "/no-auth", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "User not authenticated");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleted_user_is_unauthorized(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    sqlx::query("UPDATE users SET deleted_at = NOW() WHERE id = $1")
        .bind(admin.id)
        .execute(&pool)
        .await
        .unwrap();
    let token = token_for(admin.id);

    for uri in ["/admin", "/guard/admin"] {
        let (status, body) = call(&pool, uri, Some(&token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(error_message(&body), "User not found");
    }
}
