use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use bahrululum_core::{ApiResponse, AppError, ErrorResponse, parse_id};
use bahrululum_models::{CreateEnrollmentRequest, Enrollment, EnrollmentListResponse};

use crate::middleware::role::CurrentUser;
use crate::modules::enrollments::service::EnrollmentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Enroll the caller, or (admins only) another user, in a course
#[utoipa::path(
    post,
    path = "/api/enrollments",
    request_body = CreateEnrollmentRequest,
    responses(
        (status = 201, description = "Enrollment created successfully", body = ApiResponse<Enrollment>),
        (status = 403, description = "Only admins may enroll other users", body = ErrorResponse),
        (status = 409, description = "Already enrolled", body = ErrorResponse),
        (status = 422, description = "Course or user not found", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current_user, dto), fields(user_id = %current_user.id))]
pub async fn create_enrollment(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateEnrollmentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Enrollment>>), AppError> {
    let user_id = dto.user_id.unwrap_or(current_user.id);
    if user_id != current_user.id && !current_user.is_admin() {
        return Err(AppError::forbidden(anyhow!("Insufficient privileges")));
    }

    let enrollment = EnrollmentService::enroll(&state.db, user_id, dto.course_id).await?;
    Ok(ApiResponse::created("Enrollment created successfully", enrollment))
}

#[utoipa::path(
    get,
    path = "/api/enrollments/my",
    responses(
        (status = 200, description = "Enrollments retrieved successfully", body = ApiResponse<EnrollmentListResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn get_my_enrollments(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
) -> Result<Json<ApiResponse<EnrollmentListResponse>>, AppError> {
    let enrollments = EnrollmentService::list_by_user(&state.db, current_user.id).await?;

    Ok(ApiResponse::ok(
        "Enrollments retrieved successfully",
        EnrollmentListResponse {
            count: enrollments.len(),
            enrollments,
        },
    ))
}

#[utoipa::path(
    get,
    path = "/api/enrollments/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Enrollment retrieved successfully", body = ApiResponse<EnrollmentListResponse>),
        (status = 400, description = "Invalid course ID", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_course_enrollments(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<ApiResponse<EnrollmentListResponse>>, AppError> {
    let course_id = parse_id(&course_id, "course")?;
    let enrollments = EnrollmentService::list_by_course(&state.db, course_id).await?;

    Ok(ApiResponse::ok(
        "Enrollment retrieved successfully",
        EnrollmentListResponse {
            count: enrollments.len(),
            enrollments,
        },
    ))
}

/// Unenroll the caller from a course
#[utoipa::path(
    delete,
    path = "/api/enrollments/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Enrollment deleted successfully"),
        (status = 400, description = "Invalid course ID", body = ErrorResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn delete_enrollment(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Path(course_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let course_id = parse_id(&course_id, "course")?;
    EnrollmentService::unenroll(&state.db, current_user.id, course_id).await?;
    Ok(ApiResponse::message("Enrollment deleted successfully"))
}
