use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::auth::{login, logout, verify_email};

pub fn build_auth_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/verify/:user_id", get(verify_email));

    Router::new().nest("/auth", routers)
}
