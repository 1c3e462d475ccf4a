use crate::model::{
    id::{BookingId, ItemId, UserId},
    list::Pagination,
};
use chrono::{DateTime, Utc};
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, EnumString};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

impl BookingStatus {
    /// 承認・却下がすでに決まっているかどうか。
    pub fn is_decided(self) -> bool {
        !matches!(self, BookingStatus::Waiting)
    }
}

/// 予約一覧の絞り込み条件。
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    pub fn parse(state: &str) -> AppResult<Self> {
        state
            .parse()
            .map_err(|_| AppError::ValidationError(format!("Unknown state: {state}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub booking_id: BookingId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: BookingStatus,
    pub item: BookingItem,
    pub booker: BookingUser,
}

impl Booking {
    // 予約を参照できるのは予約者とアイテムの所有者だけ
    pub fn is_visible_to(&self, user_id: UserId) -> bool {
        self.booker.user_id == user_id || self.item.owner_id == user_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingItem {
    pub item_id: ItemId,
    pub item_name: String,
    pub owner_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingUser {
    pub user_id: UserId,
    pub user_name: String,
}

/// アイテム詳細に載せる予約の要約
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSummary {
    pub booking_id: BookingId,
    pub booker_id: UserId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingParty {
    Booker(UserId),
    Owner(UserId),
}

#[derive(Debug, Clone, Copy)]
pub struct BookingListOptions {
    pub party: BookingParty,
    pub state: BookingState,
    pub now: DateTime<Utc>,
    pub pagination: Pagination,
}
