//! # Bahrululum Models
//!
//! Database rows, request/response DTOs and validation rules.
//!
//! - [`users`]: accounts and the [`UserRole`] allow-list values
//! - [`auth`]: registration, login and token DTOs
//! - [`courses`], [`chapters`], [`contents`]: the course catalogue
//! - [`enrollments`]: user ↔ course membership

pub mod auth;
pub mod chapters;
pub mod contents;
pub mod courses;
pub mod enrollments;
pub mod users;

pub use auth::{
    LoginRequest, RefreshToken, RefreshTokenRequest, RegisterRequest, TokenResponse,
};
pub use chapters::{
    Chapter, ChapterListResponse, ChapterQuery, ChapterWithContents, CreateChapterRequest,
    UpdateChapterRequest,
};
pub use contents::{
    CONTENT_TYPES, Content, ContentListResponse, ContentQuery, CreateContentRequest,
    UpdateContentRequest,
};
pub use courses::{Course, CourseListResponse, CreateCourseRequest};
pub use enrollments::{CreateEnrollmentRequest, Enrollment, EnrollmentListResponse};
pub use users::{CreateUserRequest, UpdateUserRequest, User, UserListResponse, UserRole};
