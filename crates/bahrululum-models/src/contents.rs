//! Course content models and DTOs.
//!
//! A content item belongs to a chapter and is one of a fixed set of types.
//! Media types point at `file_url`; text items carry `content_text`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::chapters::normalize_order;

pub const CONTENT_TYPES: [&str; 7] = ["video", "text", "image", "pdf", "link", "audio", "document"];

pub fn is_valid_content_type(content_type: &str) -> bool {
    CONTENT_TYPES.contains(&content_type)
}

fn validate_content_type(content_type: &str) -> Result<(), ValidationError> {
    if is_valid_content_type(content_type) {
        Ok(())
    } else {
        Err(ValidationError::new("content_type").with_message(
            "content_type must be one of: video, text, image, pdf, link, audio, document".into(),
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Content {
    pub id: Uuid,
    pub chapter_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub content_type: String,
    pub file_url: Option<String>,
    pub content_text: Option<String>,
    pub content_order: i32,
    pub is_published: bool,
    pub duration_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateContentRequest {
    pub chapter_id: Uuid,
    #[validate(length(min = 1, max = 255, message = "title must be between 1 and 255 characters"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(custom(function = "validate_content_type"))]
    #[schema(example = "video")]
    pub content_type: String,
    #[validate(url(message = "file_url must be a valid URL"), length(max = 500))]
    pub file_url: Option<String>,
    pub content_text: Option<String>,
    /// Defaults to 1; 0 is treated as 1
    pub content_order: Option<i32>,
    #[serde(default)]
    pub is_published: bool,
    #[validate(range(min = 0, message = "duration_minutes must not be negative"))]
    pub duration_minutes: Option<i32>,
}

impl CreateContentRequest {
    pub fn effective_order(&self) -> i32 {
        normalize_order(self.content_order)
    }
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateContentRequest {
    #[validate(length(min = 1, max = 255, message = "title must be between 1 and 255 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "validate_content_type"))]
    pub content_type: Option<String>,
    #[validate(url(message = "file_url must be a valid URL"), length(max = 500))]
    pub file_url: Option<String>,
    pub content_text: Option<String>,
    pub content_order: Option<i32>,
    pub is_published: Option<bool>,
    #[validate(range(min = 0, message = "duration_minutes must not be negative"))]
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContentQuery {
    /// Chapter to list contents for
    pub chapter_id: Option<String>,
    /// List every content item of this type instead of a single chapter
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContentListResponse {
    pub contents: Vec<Content>,
    pub count: usize,
}
