use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::facility::{
    delete_facility, register_facility, show_facility_list, update_facility,
};

pub fn build_facility_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", get(show_facility_list).post(register_facility))
        .route("/:facility_id", put(update_facility).delete(delete_facility));

    Router::new().nest("/facilities", routers)
}
