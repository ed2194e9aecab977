mod common;

use axum::http::StatusCode;
use bahrululum_models::UserRole;
use common::{create_test_course, create_test_user, error_message, send, token_for};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_user_enrolls_self(pool: PgPool) {
    let course_id = create_test_course(&pool, "Rust Basics").await;
    let user = create_test_user(&pool, UserRole::User).await;

    let (status, body) = send(
        &pool,
        "POST",
        "/api/enrollments",
        Some(&token_for(user.id)),
        Some(json!({ "course_id": course_id })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Enrollment created successfully");
    assert_eq!(body["data"]["user_id"], user.id.to_string());
    assert_eq!(body["data"]["course_id"], course_id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_enrollment_conflicts(pool: PgPool) {
    let course_id = create_test_course(&pool, "Rust Basics").await;
    let user = create_test_user(&pool, UserRole::User).await;
    let token = token_for(user.id);
    let body = json!({ "course_id": course_id });

    let (status, _) = send(&pool, "POST", "/api/enrollments", Some(&token), Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, resp) = send(&pool, "POST", "/api/enrollments", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_message(&resp), "User is already enrolled in this course");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_unknown_course(pool: PgPool) {
    let user = create_test_user(&pool, UserRole::User).await;

    let (status, body) = send(
        &pool,
        "POST",
        "/api/enrollments",
        Some(&token_for(user.id)),
        Some(json!({ "course_id": Uuid::new_v4() })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_message(&body), "Course not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_only_admin_enrolls_others(pool: PgPool) {
    let course_id = create_test_course(&pool, "Rust Basics").await;
    let mentor = create_test_user(&pool, UserRole::Mentor).await;
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let learner = create_test_user(&pool, UserRole::User).await;
    let body = json!({ "course_id": course_id, "user_id": learner.id });

    let (status, resp) = send(
        &pool,
        "POST",
        "/api/enrollments",
        Some(&token_for(mentor.id)),
        Some(body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_message(&resp), "Insufficient privileges");

    let (status, resp) = send(
        &pool,
        "POST",
        "/api/enrollments",
        Some(&token_for(admin.id)),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp["data"]["user_id"], learner.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_enrolls_unknown_user(pool: PgPool) {
    let course_id = create_test_course(&pool, "Rust Basics").await;
    let admin = create_test_user(&pool, UserRole::Admin).await;

    let (status, body) = send(
        &pool,
        "POST",
        "/api/enrollments",
        Some(&token_for(admin.id)),
        Some(json!({ "course_id": course_id, "user_id": Uuid::new_v4() })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_message(&body), "User not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_my_enrollments_and_course_roster(pool: PgPool) {
    let course_a = create_test_course(&pool, "A").await;
    let course_b = create_test_course(&pool, "B").await;
    let user = create_test_user(&pool, UserRole::User).await;
    let other = create_test_user(&pool, UserRole::User).await;
    let token = token_for(user.id);

    for course_id in [course_a, course_b] {
        let (status, _) = send(
            &pool,
            "POST",
            "/api/enrollments",
            Some(&token),
            Some(json!({ "course_id": course_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, _) = send(
        &pool,
        "POST",
        "/api/enrollments",
        Some(&token_for(other.id)),
        Some(json!({ "course_id": course_a })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&pool, "GET", "/api/enrollments/my", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Enrollments retrieved successfully");
    assert_eq!(body["data"]["count"], 2);

    let (status, body) = send(
        &pool,
        "GET",
        &format!("/api/enrollments/{}", course_a),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unenroll_then_reenroll(pool: PgPool) {
    let course_id = create_test_course(&pool, "Rust Basics").await;
    let user = create_test_user(&pool, UserRole::User).await;
    let token = token_for(user.id);
    let uri = format!("/api/enrollments/{}", course_id);

    let (status, _) = send(
        &pool,
        "POST",
        "/api/enrollments",
        Some(&token),
        Some(json!({ "course_id": course_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&pool, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Enrollment deleted successfully");

    let (status, body) = send(&pool, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "Enrollment not found");

    // The unique index only covers live rows.
    let (status, _) = send(
        &pool,
        "POST",
        "/api/enrollments",
        Some(&token),
        Some(json!({ "course_id": course_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_invalid_course_id_path(pool: PgPool) {
    let user = create_test_user(&pool, UserRole::User).await;

    let (status, body) = send(
        &pool,
        "GET",
        "/api/enrollments/not-a-uuid",
        Some(&token_for(user.id)),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Invalid course ID");
}
