use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use bahrululum_core::{ErrorResponse, PaginationParams};
use bahrululum_models::{
    Chapter, ChapterListResponse, ChapterWithContents, Content, ContentListResponse, Course,
    CourseListResponse, CreateChapterRequest, CreateContentRequest, CreateCourseRequest,
    CreateEnrollmentRequest, CreateUserRequest, Enrollment, EnrollmentListResponse, LoginRequest,
    RefreshTokenRequest, RegisterRequest, TokenResponse, UpdateChapterRequest,
    UpdateContentRequest, UpdateUserRequest, User, UserListResponse, UserRole,
};

use crate::modules::health::controller::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health_check,
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh,
        crate::modules::auth::controller::logout,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::chapters::controller::get_chapters,
        crate::modules::chapters::controller::get_chapter,
        crate::modules::chapters::controller::get_chapter_with_contents,
        crate::modules::chapters::controller::create_chapter,
        crate::modules::chapters::controller::update_chapter,
        crate::modules::chapters::controller::delete_chapter,
        crate::modules::contents::controller::get_contents,
        crate::modules::contents::controller::get_content,
        crate::modules::contents::controller::create_content,
        crate::modules::contents::controller::update_content,
        crate::modules::contents::controller::delete_content,
        crate::modules::enrollments::controller::create_enrollment,
        crate::modules::enrollments::controller::get_my_enrollments,
        crate::modules::enrollments::controller::get_course_enrollments,
        crate::modules::enrollments::controller::delete_enrollment,
    ),
    components(
        schemas(
            ErrorResponse,
            PaginationParams,
            HealthResponse,
            User,
            UserRole,
            CreateUserRequest,
            UpdateUserRequest,
            UserListResponse,
            RegisterRequest,
            LoginRequest,
            RefreshTokenRequest,
            TokenResponse,
            Course,
            CreateCourseRequest,
            CourseListResponse,
            Chapter,
            CreateChapterRequest,
            UpdateChapterRequest,
            ChapterListResponse,
            ChapterWithContents,
            Content,
            CreateContentRequest,
            UpdateContentRequest,
            ContentListResponse,
            Enrollment,
            CreateEnrollmentRequest,
            EnrollmentListResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Registration, login and token refresh"),
        (name = "Users", description = "User management (admin) and profile"),
        (name = "Courses", description = "Course catalogue"),
        (name = "Chapters", description = "Course chapters"),
        (name = "Contents", description = "Chapter contents"),
        (name = "Enrollments", description = "Course enrollments")
    ),
    info(
        title = "Bahrululum API",
        version = "0.1.0",
        description = "Course management REST API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
