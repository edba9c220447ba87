use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::user::{
    change_password, get_current_user, list_users, reset_password, show_owner_profile, signup,
};

pub fn build_user_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", get(list_users))
        .route("/signup/:role", post(signup))
        .route("/reset-password", post(reset_password))
        .route("/me", get(get_current_user))
        .route("/me/password", put(change_password))
        .route("/profile/:login_id", get(show_owner_profile));

    Router::new().nest("/users", routers)
}
