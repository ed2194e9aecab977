//! # Bahrululum API
//!
//! Course-management REST API built with Axum and PostgreSQL: users,
//! courses, chapters, chapter contents and enrollments, behind JWT
//! authentication and role checks.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # require_auth, role layers and extractors
//! ├── modules/          # Feature modules
//! │   ├── auth/        # register, login, refresh, logout
//! │   ├── users/       # admin user management, /me
//! │   ├── courses/
//! │   ├── chapters/
//! │   ├── contents/
//! │   ├── enrollments/
//! │   └── health/
//! ├── docs.rs           # OpenAPI document
//! ├── logging.rs        # subscriber setup and request logging
//! ├── router.rs         # route tree and tower layers
//! ├── state.rs          # shared state
//! └── validator.rs      # ValidatedJson extractor
//! ```
//!
//! Each feature module has a `controller.rs` (handlers), `service.rs`
//! (SQL) and `router.rs`. Rows and DTOs live in `bahrululum-models`.
//!
//! ## Roles
//!
//! | Role | Can |
//! |------|-----|
//! | `user` | read the catalogue, manage own enrollments |
//! | `mentor` | everything `user` can, plus write courses, chapters, contents |
//! | `admin` | everything, plus `/api/users` and enrolling other users |
//!
//! Admins are created with `bahrululum-cli create-admin`.
//!
//! ## Authentication
//!
//! - **Access token**: 15 minutes by default, sent as `Authorization: Bearer <token>`
//! - **Refresh token**: 7 days by default, stored server side and rotated on use
//!
//! ## API Documentation
//!
//! - Swagger UI: `/swagger-ui`
//! - Scalar: `/scalar`

pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use bahrululum_auth;
pub use bahrululum_config;
pub use bahrululum_core;
pub use bahrululum_db;
pub use bahrululum_models;
