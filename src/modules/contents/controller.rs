use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use bahrululum_core::{ApiResponse, AppError, ErrorResponse, parse_id, parse_required_param};
use bahrululum_models::{
    Content, ContentListResponse, ContentQuery, CreateContentRequest, UpdateContentRequest,
};

use crate::middleware::role::RequireMentorOrAdmin;
use crate::modules::contents::service::ContentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List contents of a chapter, or every content of one type
#[utoipa::path(
    get,
    path = "/api/contents",
    params(ContentQuery),
    responses(
        (status = 200, description = "Contents retrieved successfully", body = ApiResponse<ContentListResponse>),
        (status = 400, description = "Missing or invalid chapter_id", body = ErrorResponse)
    ),
    tag = "Contents",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_contents(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<ApiResponse<ContentListResponse>>, AppError> {
    let non_empty = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    let chapter_id = non_empty(&query.chapter_id);
    let content_type = non_empty(&query.content_type);

    let contents = match (chapter_id.as_deref(), content_type.as_deref()) {
        (None, Some(content_type)) => ContentService::list_by_type(&state.db, content_type).await?,
        (chapter_id, _) => {
            let chapter_id = parse_required_param(chapter_id, "chapter_id")?;
            ContentService::list_by_chapter(&state.db, chapter_id).await?
        }
    };

    Ok(ApiResponse::ok(
        "Contents retrieved successfully",
        ContentListResponse {
            count: contents.len(),
            contents,
        },
    ))
}

#[utoipa::path(
    get,
    path = "/api/contents/{id}",
    params(("id" = Uuid, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Content retrieved successfully", body = ApiResponse<Content>),
        (status = 400, description = "Invalid content ID", body = ErrorResponse),
        (status = 404, description = "Content not found", body = ErrorResponse)
    ),
    tag = "Contents",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Content>>, AppError> {
    let id = parse_id(&id, "content")?;
    let content = ContentService::get_content(&state.db, id).await?;
    Ok(ApiResponse::ok("Content retrieved successfully", content))
}

#[utoipa::path(
    post,
    path = "/api/contents",
    request_body = CreateContentRequest,
    responses(
        (status = 201, description = "Content created successfully", body = ApiResponse<Content>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Insufficient privileges", body = ErrorResponse),
        (status = 422, description = "Chapter not found", body = ErrorResponse)
    ),
    tag = "Contents",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user, dto), fields(user_id = %user.id))]
pub async fn create_content(
    State(state): State<AppState>,
    RequireMentorOrAdmin(user): RequireMentorOrAdmin,
    ValidatedJson(dto): ValidatedJson<CreateContentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Content>>), AppError> {
    let content = ContentService::create_content(&state.db, dto).await?;
    Ok(ApiResponse::created("Content created successfully", content))
}

#[utoipa::path(
    put,
    path = "/api/contents/{id}",
    params(("id" = Uuid, Path, description = "Content ID")),
    request_body = UpdateContentRequest,
    responses(
        (status = 200, description = "Content updated successfully", body = ApiResponse<Content>),
        (status = 400, description = "Invalid content ID or body", body = ErrorResponse),
        (status = 403, description = "Insufficient privileges", body = ErrorResponse),
        (status = 404, description = "Content not found", body = ErrorResponse)
    ),
    tag = "Contents",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user, dto), fields(user_id = %user.id))]
pub async fn update_content(
    State(state): State<AppState>,
    RequireMentorOrAdmin(user): RequireMentorOrAdmin,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateContentRequest>,
) -> Result<Json<ApiResponse<Content>>, AppError> {
    let id = parse_id(&id, "content")?;
    let content = ContentService::update_content(&state.db, id, dto).await?;
    Ok(ApiResponse::ok("Content updated successfully", content))
}

#[utoipa::path(
    delete,
    path = "/api/contents/{id}",
    params(("id" = Uuid, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Content deleted successfully"),
        (status = 400, description = "Invalid content ID", body = ErrorResponse),
        (status = 403, description = "Insufficient privileges", body = ErrorResponse),
        (status = 404, description = "Content not found", body = ErrorResponse)
    ),
    tag = "Contents",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_content(
    State(state): State<AppState>,
    RequireMentorOrAdmin(user): RequireMentorOrAdmin,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = parse_id(&id, "content")?;
    ContentService::delete_content(&state.db, id).await?;
    Ok(ApiResponse::message("Content deleted successfully"))
}
