#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use bahrululum::router::init_router;
use bahrululum::state::AppState;
use bahrululum_auth::create_access_token;
use bahrululum_config::{CorsConfig, JwtConfig};
use bahrululum_core::hash_password;
use bahrululum_models::UserRole;

pub const TEST_PASSWORD: &str = "testpass123";

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub nip: String,
    pub password: String,
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-key-32-chars".to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 3600,
        issuer: "bahrululum".to_string(),
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    let state = AppState::new(
        pool,
        jwt_config(),
        CorsConfig {
            allowed_origins: vec![],
        },
    );
    init_router(state)
}

pub fn token_for(user_id: Uuid) -> String {
    create_access_token(user_id, &jwt_config()).unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// 12 digits, unique enough across a test run.
pub fn generate_unique_nip() -> String {
    let n = Uuid::new_v4().as_u128() % 1_000_000_000_000;
    format!("{:012}", n)
}

pub async fn create_test_user(pool: &PgPool, role: UserRole) -> TestUser {
    create_test_user_with(pool, role, true).await
}

pub async fn create_test_user_with(pool: &PgPool, role: UserRole, is_active: bool) -> TestUser {
    let email = generate_unique_email();
    let nip = generate_unique_nip();
    let hashed = hash_password(TEST_PASSWORD).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO users (name, email, nip, password, role, is_active)
           VALUES ($1, $2, $3, $4, $5, $6)
           RETURNING id"#,
    )
    .bind("Test User")
    .bind(&email)
    .bind(&nip)
    .bind(&hashed)
    .bind(role.as_str())
    .bind(is_active)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email,
        nip,
        password: TEST_PASSWORD.to_string(),
    }
}

pub async fn create_test_course(pool: &PgPool, name: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO courses (name, description) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind("Test course description")
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_chapter(pool: &PgPool, course_id: Uuid, title: &str, order: i32) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO course_chapters (course_id, title, chapter_order)
           VALUES ($1, $2, $3)
           RETURNING id"#,
    )
    .bind(course_id)
    .bind(title)
    .bind(order)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_content(
    pool: &PgPool,
    chapter_id: Uuid,
    title: &str,
    content_type: &str,
    order: i32,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO course_contents (chapter_id, title, content_type, content_order)
           VALUES ($1, $2, $3, $4)
           RETURNING id"#,
    )
    .bind(chapter_id)
    .bind(title)
    .bind(content_type)
    .bind(order)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Sends one request through a fresh router and returns status plus JSON body.
pub async fn send(
    pool: &PgPool,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = setup_test_app(pool.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// Asserts the error envelope and returns its `error` text.
pub fn error_message(body: &Value) -> &str {
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Something went wrong");
    body["error"].as_str().unwrap()
}
