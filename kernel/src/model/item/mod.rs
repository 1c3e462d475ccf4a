use crate::model::{
    booking::BookingSummary,
    id::{ItemId, ItemRequestId, UserId},
    review::Review,
};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub item_id: ItemId,
    pub item_name: String,
    pub description: String,
    pub available: bool,
    pub owner: ItemOwner,
    pub request_id: Option<ItemRequestId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOwner {
    pub owner_id: UserId,
    pub owner_name: String,
}

impl Item {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner.owner_id == user_id
    }
}

/// 所有者にだけ開示される、直近と次回の予約。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemBookings {
    pub last_booking: Option<BookingSummary>,
    pub next_booking: Option<BookingSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetail {
    pub item: Item,
    // 閲覧者が所有者でない場合は None
    pub bookings: Option<ItemBookings>,
    pub reviews: Vec<Review>,
}
