use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_content, delete_content, get_content, get_contents, update_content};

pub fn init_contents_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_contents).post(create_content))
        .route(
            "/{id}",
            get(get_content).put(update_content).delete(delete_content),
        )
}
