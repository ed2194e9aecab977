pub mod auth;
pub mod chapters;
pub mod contents;
pub mod courses;
pub mod enrollments;
pub mod health;
pub mod users;
