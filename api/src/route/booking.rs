use axum::{
    routing::{get, patch, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{
    approve_booking, register_booking, show_booked_list, show_booking, show_owner_booking_list,
};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let bookings_routers = Router::new()
        .route("/", post(register_booking))
        .route("/", get(show_booked_list))
        .route("/owner", get(show_owner_booking_list))
        .route("/:booking_id", get(show_booking))
        .route("/:booking_id", patch(approve_booking));

    Router::new().nest("/bookings", bookings_routers)
}
