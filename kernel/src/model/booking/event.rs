use crate::model::id::{BookingId, ItemId, UserId};
use chrono::{DateTime, Utc};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateBooking {
    pub item_id: ItemId,
    pub booked_by: UserId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

#[derive(Debug, new)]
pub struct ApproveBooking {
    pub booking_id: BookingId,
    pub requested_user: UserId,
    pub approved: bool,
}
