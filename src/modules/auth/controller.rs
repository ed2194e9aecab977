use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use bahrululum_core::{ApiResponse, AppError, ErrorResponse};
use bahrululum_models::{LoginRequest, RefreshTokenRequest, RegisterRequest, TokenResponse};

use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new account with the `user` role
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<TokenResponse>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Email or NIP already in use", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TokenResponse>>), AppError> {
    let response = AuthService::register_user(&state.db, dto, &state.jwt_config).await?;
    Ok(ApiResponse::created("User registered successfully", response))
}

/// Login with NIP and password
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<TokenResponse>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Invalid credentials or inactive account", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, AppError> {
    let response = AuthService::login_user(&state.db, dto, &state.jwt_config).await?;
    Ok(ApiResponse::ok("Login successful", response))
}

/// Exchange a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/api/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token refreshed successfully", body = ApiResponse<TokenResponse>),
        (status = 401, description = "Invalid or expired token", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RefreshTokenRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, AppError> {
    let response =
        AuthService::refresh_token(&state.db, &dto.refresh_token, &state.jwt_config).await?;
    Ok(ApiResponse::ok("Token refreshed successfully", response))
}

/// Revoke a refresh token
#[utoipa::path(
    post,
    path = "/api/logout",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Logout successful"),
        (status = 401, description = "Invalid refresh token", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn logout(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RefreshTokenRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    AuthService::logout(&state.db, &dto.refresh_token).await?;
    Ok(ApiResponse::message("Logout successful"))
}
