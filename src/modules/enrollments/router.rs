use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_enrollment, delete_enrollment, get_course_enrollments, get_my_enrollments,
};

pub fn init_enrollments_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_enrollment))
        .route("/my", get(get_my_enrollments))
        .route(
            "/{course_id}",
            get(get_course_enrollments).delete(delete_enrollment),
        )
}
