//! Response envelopes shared by every endpoint.

use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const ERROR_MESSAGE: &str = "Something went wrong";

/// Success envelope: `{"success": true, "message": ..., "data": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// 200 with payload.
    pub fn ok(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self::new(message, data))
    }

    /// 201 with payload.
    pub fn created(message: impl Into<String>, data: T) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Json(Self::new(message, data)))
    }
}

impl ApiResponse<()> {
    /// 200 with `"data": null`.
    pub fn message(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data: None,
        })
    }
}

/// Error envelope: `{"success": false, "message": "Something went wrong", "error": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: ERROR_MESSAGE.to_string(),
            error: error.into(),
        }
    }
}
