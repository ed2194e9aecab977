//! Request authentication and role checks.
//!
//! - [`auth`]: bearer token verification ([`auth::require_auth`], [`auth::AuthUser`])
//! - [`role`]: role allow-lists ([`role::require_roles`] and presets,
//!   [`role::CurrentUser`], [`role::RequireAdmin`], [`role::RequireMentorOrAdmin`])
//!
//! # Flow
//!
//! 1. `require_auth` verifies `Authorization: Bearer <token>` and stores an `AuthUser`
//! 2. A role layer loads the user row and checks its role, storing a `CurrentUser`
//! 3. Handlers extract `CurrentUser`, or narrow further with a role guard
//!
//! ```ignore
//! async fn create_course(
//!     RequireMentorOrAdmin(user): RequireMentorOrAdmin,
//!     ValidatedJson(dto): ValidatedJson<CreateCourseRequest>,
//! ) -> Result<impl IntoResponse, AppError> {
//!     // only mentors and admins get here
//! }
//! ```

pub mod auth;
pub mod role;
