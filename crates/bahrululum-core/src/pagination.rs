//! Offset/limit pagination for list endpoints.
//!
//! Query values are parsed leniently: anything that is not a usable number
//! falls back to the default instead of rejecting the request.
//!
//! - `offset`: missing, malformed or negative → `0`
//! - `limit`: missing, malformed or outside `1..=100` → `10`
//!
//! # Example
//!
//! ```ignore
//! async fn list_courses(Query(params): Query<PaginationParams>) -> ... {
//!     let courses = CourseService::list(&db, params.offset(), params.limit()).await?;
//! }
//! ```

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Number of items to skip (default: 0)
    #[param(value_type = Option<i64>)]
    #[schema(value_type = Option<i64>)]
    pub offset: Option<String>,
    /// Maximum number of items to return (1-100, default: 10)
    #[param(value_type = Option<i64>)]
    #[schema(value_type = Option<i64>)]
    pub limit: Option<String>,
}

impl PaginationParams {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset: Some(offset.to_string()),
            limit: Some(limit.to_string()),
        }
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        parse(self.offset.as_deref())
            .filter(|offset| *offset >= 0)
            .unwrap_or(0)
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        parse(self.limit.as_deref())
            .filter(|limit| (1..=MAX_LIMIT).contains(limit))
            .unwrap_or(DEFAULT_LIMIT)
    }
}

fn parse(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}
