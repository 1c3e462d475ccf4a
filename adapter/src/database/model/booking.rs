use chrono::{DateTime, Utc};
use kernel::model::{
    booking::{Booking, BookingItem, BookingStatus, BookingSummary, BookingUser},
    id::{BookingId, ItemId, UserId},
};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: String,
    pub item_id: ItemId,
    pub item_name: String,
    pub owned_by: UserId,
    pub booked_by: UserId,
    pub booker_name: String,
}

// status は TEXT で保存しているため、変換に失敗しうる
impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(value: BookingRow) -> Result<Self, Self::Error> {
        let BookingRow {
            booking_id,
            start_at,
            end_at,
            status,
            item_id,
            item_name,
            owned_by,
            booked_by,
            booker_name,
        } = value;
        let status = status.parse::<BookingStatus>().map_err(|_| {
            AppError::ConversionEntityError(format!(
                "booking {booking_id} has unknown status `{status}`"
            ))
        })?;
        Ok(Booking {
            booking_id,
            start_at,
            end_at,
            status,
            item: BookingItem {
                item_id,
                item_name,
                owner_id: owned_by,
            },
            booker: BookingUser {
                user_id: booked_by,
                user_name: booker_name,
            },
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct BookingSummaryRow {
    pub booking_id: BookingId,
    pub booked_by: UserId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

impl From<BookingSummaryRow> for BookingSummary {
    fn from(value: BookingSummaryRow) -> Self {
        BookingSummary {
            booking_id: value.booking_id,
            booker_id: value.booked_by,
            start_at: value.start_at,
            end_at: value.end_at,
        }
    }
}
