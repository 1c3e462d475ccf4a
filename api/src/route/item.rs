use axum::{
    routing::{get, patch, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::item::{
    register_comment, register_item, search_items, show_item, show_owned_item_list, update_item,
};

pub fn build_item_routers() -> Router<AppRegistry> {
    let items_routers = Router::new()
        .route("/", post(register_item))
        .route("/", get(show_owned_item_list))
        .route("/search", get(search_items))
        .route("/:item_id", get(show_item))
        .route("/:item_id", patch(update_item))
        .route("/:item_id/comment", post(register_comment));

    Router::new().nest("/items", items_routers)
}
