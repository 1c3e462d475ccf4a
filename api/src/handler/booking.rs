use axum::{
    extract::{Path, Query, State},
    Json,
};
use garde::Validate;
use kernel::model::{
    booking::{event::ApproveBooking, BookingState},
    id::BookingId,
};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::SharerUser,
    model::booking::{ApproveQuery, BookingListQuery, BookingResponse, CreateBookingRequest},
};

pub async fn register_booking(
    user: SharerUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<Json<BookingResponse>> {
    req.validate(&())?;

    registry
        .booking_service()
        .create(req.into_event(user.id())?)
        .await
        .map(BookingResponse::from)
        .map(Json)
}

pub async fn show_booking(
    user: SharerUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_service()
        .find_by_id(booking_id, user.id())
        .await
        .map(BookingResponse::from)
        .map(Json)
}

pub async fn approve_booking(
    user: SharerUser,
    Path(booking_id): Path<BookingId>,
    Query(query): Query<ApproveQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_service()
        .approve(ApproveBooking::new(booking_id, user.id(), query.approved))
        .await
        .map(BookingResponse::from)
        .map(Json)
}

pub async fn show_booked_list(
    user: SharerUser,
    Query(query): Query<BookingListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    query.validate(&())?;
    let state = BookingState::parse(&query.state)?;

    registry
        .booking_service()
        .find_for_booker(user.id(), state, query.pagination())
        .await
        .map(|bookings| bookings.into_iter().map(BookingResponse::from).collect())
        .map(Json)
}

pub async fn show_owner_booking_list(
    user: SharerUser,
    Query(query): Query<BookingListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    query.validate(&())?;
    let state = BookingState::parse(&query.state)?;

    registry
        .booking_service()
        .find_for_owner(user.id(), state, query.pagination())
        .await
        .map(|bookings| bookings.into_iter().map(BookingResponse::from).collect())
        .map(Json)
}
