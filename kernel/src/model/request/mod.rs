use crate::model::{
    id::{ItemRequestId, UserId},
    item::Item,
};
use chrono::{DateTime, Utc};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    pub request_id: ItemRequestId,
    pub description: String,
    pub requester_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// リクエストと、それに応えて登録されたアイテムの一覧。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequestWithItems {
    pub request: ItemRequest,
    pub items: Vec<Item>,
}
