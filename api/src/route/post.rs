use axum::{
    routing::{get, patch, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::post::{
    register_post, search_posts, show_owner_posts, show_post, update_post_status,
};

pub fn build_post_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", post(register_post))
        .route("/search/:location", post(search_posts))
        .route("/:post_id", get(show_post))
        .route("/:post_id/status/:status", patch(update_post_status))
        .route("/owner/:owner_id/status/:status", get(show_owner_posts));

    Router::new().nest("/posts", routers)
}
