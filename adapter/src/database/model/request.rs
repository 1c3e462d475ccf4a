use chrono::{DateTime, Utc};
use kernel::model::{
    id::{ItemRequestId, UserId},
    request::ItemRequest,
};

#[derive(sqlx::FromRow)]
pub struct ItemRequestRow {
    pub request_id: ItemRequestId,
    pub description: String,
    pub requester_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl From<ItemRequestRow> for ItemRequest {
    fn from(value: ItemRequestRow) -> Self {
        let ItemRequestRow {
            request_id,
            description,
            requester_id,
            created_at,
        } = value;
        ItemRequest {
            request_id,
            description,
            requester_id,
            created_at,
        }
    }
}
