use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::error::AppResult;

use crate::model::{
    booking::{event::CreateBooking, Booking, BookingListOptions, BookingStatus, BookingSummary},
    id::{BookingId, ItemId, UserId},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, event: CreateBooking) -> AppResult<Booking>;
    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>>;
    // 現在のステータスが `from` のときだけ `to` に書き換える。
    // 書き換えなかった場合は None を返す
    async fn update_status(
        &self,
        booking_id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
    ) -> AppResult<Option<Booking>>;
    async fn find_all(&self, options: BookingListOptions) -> AppResult<Vec<Booking>>;
    // end <= now のうち end が最も新しい予約
    async fn find_last_for_item(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<BookingSummary>>;
    // start > now のうち start が最も早い予約
    async fn find_next_for_item(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<BookingSummary>>;
    // 承認済みで end <= now の予約が存在するか
    async fn exists_completed(
        &self,
        booker_id: UserId,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> AppResult<bool>;
}
