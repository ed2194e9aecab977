mod common;

use axum::http::StatusCode;
use bahrululum_models::UserRole;
use common::{
    create_test_user, error_message, generate_unique_email, generate_unique_nip, send, token_for,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_get_me(pool: PgPool) {
    let user = create_test_user(&pool, UserRole::User).await;
    let token = token_for(user.id);

    let (status, body) = send(&pool, "GET", "/api/me", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], user.id.to_string());
    assert_eq!(body["data"]["email"], user.email);
    assert_eq!(body["data"]["nip"], user.nip);
    assert!(body["data"].get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_for_missing_user_is_unauthorized(pool: PgPool) {
    let token = token_for(Uuid::new_v4());

    let (status, body) = send(&pool, "GET", "/api/me", Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "User not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_management_is_admin_only(pool: PgPool) {
    for role in [UserRole::User, UserRole::Mentor] {
        let user = create_test_user(&pool, role).await;
        let token = token_for(user.id);

        let (status, body) = send(&pool, "GET", "/api/users", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(error_message(&body), "Insufficient privileges");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_lists_users_with_pagination(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    for _ in 0..3 {
        create_test_user(&pool, UserRole::User).await;
    }
    let token = token_for(admin.id);

    let (status, body) = send(&pool, "GET", "/api/users?offset=0&limit=2", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Users retrieved successfully");
    assert_eq!(body["data"]["count"], 2);
    assert_eq!(body["data"]["limit"], 2);
    assert_eq!(body["data"]["users"].as_array().unwrap().len(), 2);

    // Out-of-range values fall back to the defaults.
    let (status, body) =
        send(&pool, "GET", "/api/users?offset=-5&limit=abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["offset"], 0);
    assert_eq!(body["data"]["limit"], 10);
    assert_eq!(body["data"]["count"], 4);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_creates_mentor(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let token = token_for(admin.id);
    let email = generate_unique_email();

    let (status, body) = send(
        &pool,
        "POST",
        "/api/users",
        Some(&token),
        Some(json!({
            "name": "Mentor One",
            "email": email,
            "nip": generate_unique_nip(),
            "password": "password123",
            "role": "mentor"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["data"]["role"], "mentor");
    assert_eq!(body["data"]["is_active"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_rejects_unknown_role(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let token = token_for(admin.id);

    let (status, body) = send(
        &pool,
        "POST",
        "/api/users",
        Some(&token),
        Some(json!({
            "name": "Root",
            "email": generate_unique_email(),
            "nip": generate_unique_nip(),
            "password": "password123",
            "role": "superuser"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("role must be one of"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_duplicate_email(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let token = token_for(admin.id);

    let (status, body) = send(
        &pool,
        "POST",
        "/api/users",
        Some(&token),
        Some(json!({
            "name": "Dup",
            "email": admin.email,
            "nip": generate_unique_nip(),
            "password": "password123",
            "role": "user"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        error_message(&body),
        "User with this email or NIP already exists"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_user_by_id(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let user = create_test_user(&pool, UserRole::User).await;
    let token = token_for(admin.id);

    let (status, body) =
        send(&pool, "GET", &format!("/api/users/{}", user.id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], user.email);

    let (status, body) = send(&pool, "GET", "/api/users/not-a-uuid", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Invalid user ID");

    let (status, body) = send(
        &pool,
        "GET",
        &format!("/api/users/{}", Uuid::new_v4()),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "User not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_user_partial(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let user = create_test_user(&pool, UserRole::User).await;
    let token = token_for(admin.id);

    let (status, body) = send(
        &pool,
        "PUT",
        &format!("/api/users/{}", user.id),
        Some(&token),
        Some(json!({ "role": "mentor", "is_active": false })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User updated successfully");
    assert_eq!(body["data"]["role"], "mentor");
    assert_eq!(body["data"]["is_active"], false);
    assert_eq!(body["data"]["email"], user.email);
    assert_eq!(body["data"]["name"], "Test User");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_user_is_soft(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let user = create_test_user(&pool, UserRole::User).await;
    let token = token_for(admin.id);
    let uri = format!("/api/users/{}", user.id);

    let (status, body) = send(&pool, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");

    let (status, _) = send(&pool, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&pool, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let deleted_at: Option<chrono::DateTime<chrono::Utc>> =
        sqlx::query_scalar("SELECT deleted_at FROM users WHERE id = $1")
            .bind(user.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(deleted_at.is_some());

    // The deleted user's token no longer works.
    let (status, _) = send(&pool, "GET", "/api/me", Some(&token_for(user.id)), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
