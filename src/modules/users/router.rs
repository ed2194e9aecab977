use axum::{Router, routing::get};

use crate::modules::users::controller::{
    create_user, delete_user, get_me, get_user, get_users, update_user,
};
use crate::state::AppState;

/// Admin user management, mounted at `/api/users`.
pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

pub fn init_profile_router() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}
