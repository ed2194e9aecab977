use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use bahrululum_core::{ApiResponse, AppError, ErrorResponse, PaginationParams, parse_id};
use bahrululum_models::{Course, CourseListResponse, CreateCourseRequest};

use crate::middleware::role::RequireMentorOrAdmin;
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/courses",
    params(PaginationParams),
    responses(
        (status = 200, description = "Courses retrieved successfully", body = ApiResponse<CourseListResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<CourseListResponse>>, AppError> {
    let (offset, limit) = (params.offset(), params.limit());
    let courses = CourseService::list_courses(&state.db, offset, limit).await?;

    Ok(ApiResponse::ok(
        "Courses retrieved successfully",
        CourseListResponse {
            count: courses.len(),
            courses,
            offset,
            limit,
        },
    ))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course retrieved successfully", body = ApiResponse<Course>),
        (status = 400, description = "Invalid course ID", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Course>>, AppError> {
    let id = parse_id(&id, "course")?;
    let course = CourseService::get_course(&state.db, id).await?;
    Ok(ApiResponse::ok("Course retrieved successfully", course))
}

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created successfully", body = ApiResponse<Course>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Insufficient privileges", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user, dto), fields(user_id = %user.id))]
pub async fn create_course(
    State(state): State<AppState>,
    RequireMentorOrAdmin(user): RequireMentorOrAdmin,
    ValidatedJson(dto): ValidatedJson<CreateCourseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Course>>), AppError> {
    let course = CourseService::create_course(&state.db, dto).await?;
    Ok(ApiResponse::created("Course created successfully", course))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = CreateCourseRequest,
    responses(
        (status = 200, description = "Course updated successfully", body = ApiResponse<Course>),
        (status = 400, description = "Invalid course ID or body", body = ErrorResponse),
        (status = 403, description = "Insufficient privileges", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user, dto), fields(user_id = %user.id))]
pub async fn update_course(
    State(state): State<AppState>,
    RequireMentorOrAdmin(user): RequireMentorOrAdmin,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<CreateCourseRequest>,
) -> Result<Json<ApiResponse<Course>>, AppError> {
    let id = parse_id(&id, "course")?;
    let course = CourseService::update_course(&state.db, id, dto).await?;
    Ok(ApiResponse::ok("Course updated successfully", course))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted successfully"),
        (status = 400, description = "Invalid course ID", body = ErrorResponse),
        (status = 403, description = "Insufficient privileges", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_course(
    State(state): State<AppState>,
    RequireMentorOrAdmin(user): RequireMentorOrAdmin,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = parse_id(&id, "course")?;
    CourseService::delete_course(&state.db, id).await?;
    Ok(ApiResponse::message("Course deleted successfully"))
}
