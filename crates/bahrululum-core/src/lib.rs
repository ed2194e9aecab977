//! # Bahrululum Core
//!
//! Foundational types shared by every crate in the workspace:
//!
//! - [`errors`]: [`AppError`] and its HTTP response conversion
//! - [`response`]: success and error envelopes
//! - [`pagination`]: lenient offset/limit query parameters
//! - [`password`]: bcrypt hashing and verification
//! - [`ids`]: UUID parsing for path and query parameters

pub mod errors;
pub mod ids;
pub mod pagination;
pub mod password;
pub mod response;

pub use errors::AppError;
pub use ids::{parse_id, parse_required_param};
pub use pagination::PaginationParams;
pub use password::{hash_password, verify_password};
pub use response::{ApiResponse, ErrorResponse};
