use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use bahrululum_core::{ApiResponse, AppError, ErrorResponse, parse_id, parse_required_param};
use bahrululum_models::{
    Chapter, ChapterListResponse, ChapterQuery, ChapterWithContents, CreateChapterRequest,
    UpdateChapterRequest,
};

use crate::middleware::role::RequireMentorOrAdmin;
use crate::modules::chapters::service::ChapterService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/chapters",
    params(ChapterQuery),
    responses(
        (status = 200, description = "Chapters retrieved successfully", body = ApiResponse<ChapterListResponse>),
        (status = 400, description = "Missing or invalid course_id", body = ErrorResponse)
    ),
    tag = "Chapters",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_chapters(
    State(state): State<AppState>,
    Query(query): Query<ChapterQuery>,
) -> Result<Json<ApiResponse<ChapterListResponse>>, AppError> {
    let course_id = parse_required_param(query.course_id.as_deref(), "course_id")?;
    let chapters = ChapterService::list_by_course(&state.db, course_id).await?;

    Ok(ApiResponse::ok(
        "Chapters retrieved successfully",
        ChapterListResponse {
            count: chapters.len(),
            chapters,
        },
    ))
}

#[utoipa::path(
    get,
    path = "/api/chapters/{id}",
    params(("id" = Uuid, Path, description = "Chapter ID")),
    responses(
        (status = 200, description = "Chapter retrieved successfully", body = ApiResponse<Chapter>),
        (status = 400, description = "Invalid chapter ID", body = ErrorResponse),
        (status = 404, description = "Chapter not found", body = ErrorResponse)
    ),
    tag = "Chapters",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_chapter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Chapter>>, AppError> {
    let id = parse_id(&id, "chapter")?;
    let chapter = ChapterService::get_chapter(&state.db, id).await?;
    Ok(ApiResponse::ok("Chapter retrieved successfully", chapter))
}

#[utoipa::path(
    get,
    path = "/api/chapters/{id}/contents",
    params(("id" = Uuid, Path, description = "Chapter ID")),
    responses(
        (status = 200, description = "Chapter with contents retrieved successfully", body = ApiResponse<ChapterWithContents>),
        (status = 400, description = "Invalid chapter ID", body = ErrorResponse),
        (status = 404, description = "Chapter not found", body = ErrorResponse)
    ),
    tag = "Chapters",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_chapter_with_contents(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ChapterWithContents>>, AppError> {
    let id = parse_id(&id, "chapter")?;
    let chapter = ChapterService::get_chapter_with_contents(&state.db, id).await?;
    Ok(ApiResponse::ok(
        "Chapter with contents retrieved successfully",
        chapter,
    ))
}

#[utoipa::path(
    post,
    path = "/api/chapters",
    request_body = CreateChapterRequest,
    responses(
        (status = 201, description = "Chapter created successfully", body = ApiResponse<Chapter>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Insufficient privileges", body = ErrorResponse),
        (status = 422, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Chapters",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user, dto), fields(user_id = %user.id))]
pub async fn create_chapter(
    State(state): State<AppState>,
    RequireMentorOrAdmin(user): RequireMentorOrAdmin,
    ValidatedJson(dto): ValidatedJson<CreateChapterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Chapter>>), AppError> {
    let chapter = ChapterService::create_chapter(&state.db, dto).await?;
    Ok(ApiResponse::created("Chapter created successfully", chapter))
}

#[utoipa::path(
    put,
    path = "/api/chapters/{id}",
    params(("id" = Uuid, Path, description = "Chapter ID")),
    request_body = UpdateChapterRequest,
    responses(
        (status = 200, description = "Chapter updated successfully", body = ApiResponse<Chapter>),
        (status = 400, description = "Invalid chapter ID or body", body = ErrorResponse),
        (status = 403, description = "Insufficient privileges", body = ErrorResponse),
        (status = 404, description = "Chapter not found", body = ErrorResponse)
    ),
    tag = "Chapters",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user, dto), fields(user_id = %user.id))]
pub async fn update_chapter(
    State(state): State<AppState>,
    RequireMentorOrAdmin(user): RequireMentorOrAdmin,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateChapterRequest>,
) -> Result<Json<ApiResponse<Chapter>>, AppError> {
    let id = parse_id(&id, "chapter")?;
    let chapter = ChapterService::update_chapter(&state.db, id, dto).await?;
    Ok(ApiResponse::ok("Chapter updated successfully", chapter))
}

#[utoipa::path(
    delete,
    path = "/api/chapters/{id}",
    params(("id" = Uuid, Path, description = "Chapter ID")),
    responses(
        (status = 200, description = "Chapter deleted successfully"),
        (status = 400, description = "Invalid chapter ID", body = ErrorResponse),
        (status = 403, description = "Insufficient privileges", body = ErrorResponse),
        (status = 404, description = "Chapter not found", body = ErrorResponse)
    ),
    tag = "Chapters",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_chapter(
    State(state): State<AppState>,
    RequireMentorOrAdmin(user): RequireMentorOrAdmin,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = parse_id(&id, "chapter")?;
    ChapterService::delete_chapter(&state.db, id).await?;
    Ok(ApiResponse::message("Chapter deleted successfully"))
}
