use crate::model::id::{ItemId, ItemRequestId, UserId};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateItem {
    pub item_name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<ItemRequestId>,
}

#[derive(Debug, new)]
pub struct UpdateItem {
    pub item_id: ItemId,
    pub requested_user: UserId,
    pub item_name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}
