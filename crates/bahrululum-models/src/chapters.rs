//! Course chapter models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::contents::Content;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Chapter {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub chapter_order: i32,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateChapterRequest {
    pub course_id: Uuid,
    #[validate(length(min = 1, max = 255, message = "title must be between 1 and 255 characters"))]
    pub title: String,
    pub description: Option<String>,
    /// Defaults to 1; 0 is treated as 1
    pub chapter_order: Option<i32>,
    #[serde(default)]
    pub is_published: bool,
}

impl CreateChapterRequest {
    pub fn effective_order(&self) -> i32 {
        normalize_order(self.chapter_order)
    }
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateChapterRequest {
    #[validate(length(min = 1, max = 255, message = "title must be between 1 and 255 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub chapter_order: Option<i32>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChapterQuery {
    /// Course to list chapters for (required)
    pub course_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChapterListResponse {
    pub chapters: Vec<Chapter>,
    pub count: usize,
}

/// A chapter with its contents in `content_order`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChapterWithContents {
    #[serde(flatten)]
    pub chapter: Chapter,
    pub contents: Vec<Content>,
}

/// Missing or zero ordering means "first".
pub fn normalize_order(order: Option<i32>) -> i32 {
    match order {
        None | Some(0) => 1,
        Some(order) => order,
    }
}
