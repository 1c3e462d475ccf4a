use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::request::{
    register_item_request, show_item_request, show_other_item_request_list,
    show_own_item_request_list,
};

pub fn build_item_request_routers() -> Router<AppRegistry> {
    let requests_routers = Router::new()
        .route("/", post(register_item_request))
        .route("/", get(show_own_item_request_list))
        .route("/all", get(show_other_item_request_list))
        .route("/:request_id", get(show_item_request));

    Router::new().nest("/requests", requests_routers)
}
