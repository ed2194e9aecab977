//! Course models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for both create and update; an update replaces name and description.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    #[schema(example = "Introduction to Rust")]
    pub name: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseListResponse {
    pub courses: Vec<Course>,
    pub offset: i64,
    pub limit: i64,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_course_request_validation() {
        let valid = CreateCourseRequest {
            name: "Rust 101".to_string(),
            description: "Ownership, borrowing and lifetimes".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_name = CreateCourseRequest {
            name: String::new(),
            ..valid.clone()
        };
        assert!(empty_name.validate().is_err());

        let long_name = CreateCourseRequest {
            name: "x".repeat(101),
            ..valid.clone()
        };
        assert!(long_name.validate().is_err());

        let no_description = CreateCourseRequest {
            description: String::new(),
            ..valid
        };
        assert!(no_description.validate().is_err());
    }
}
