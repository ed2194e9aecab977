use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use bahrululum_core::{ApiResponse, AppError, ErrorResponse, PaginationParams, parse_id};
use bahrululum_models::{CreateUserRequest, UpdateUserRequest, User, UserListResponse};

use crate::middleware::role::CurrentUser;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/users",
    params(PaginationParams),
    responses(
        (status = 200, description = "Users retrieved successfully", body = ApiResponse<UserListResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Insufficient privileges", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<UserListResponse>>, AppError> {
    let (offset, limit) = (params.offset(), params.limit());
    let users = UserService::list_users(&state.db, offset, limit).await?;

    Ok(ApiResponse::ok(
        "Users retrieved successfully",
        UserListResponse {
            count: users.len(),
            users,
            offset,
            limit,
        },
    ))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = ApiResponse<User>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Email or NIP already in use", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    let user = UserService::create_user(&state.db, dto).await?;
    Ok(ApiResponse::created("User created successfully", user))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User retrieved successfully", body = ApiResponse<User>),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let id = parse_id(&id, "user")?;
    let user = UserService::get_user_by_id(&state.db, id).await?;
    Ok(ApiResponse::ok("User retrieved successfully", user))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = ApiResponse<User>),
        (status = 400, description = "Invalid user ID or body", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let id = parse_id(&id, "user")?;
    let user = UserService::update_user(&state.db, id, dto).await?;
    Ok(ApiResponse::ok("User updated successfully", user))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted successfully"),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = parse_id(&id, "user")?;
    UserService::delete_user(&state.db, id).await?;
    Ok(ApiResponse::message("User deleted successfully"))
}

/// Profile of the authenticated user.
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "User retrieved successfully", body = ApiResponse<User>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(current_user))]
pub async fn get_me(
    CurrentUser(current_user): CurrentUser,
) -> Result<Json<ApiResponse<User>>, AppError> {
    Ok(ApiResponse::ok("User retrieved successfully", current_user))
}
