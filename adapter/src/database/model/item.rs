use kernel::model::{
    id::{ItemId, ItemRequestId, UserId},
    item::{Item, ItemOwner},
};

#[derive(sqlx::FromRow)]
pub struct ItemRow {
    pub item_id: ItemId,
    pub item_name: String,
    pub description: String,
    pub available: bool,
    pub owned_by: UserId,
    pub owner_name: String,
    pub request_id: Option<ItemRequestId>,
}

impl From<ItemRow> for Item {
    fn from(value: ItemRow) -> Self {
        let ItemRow {
            item_id,
            item_name,
            description,
            available,
            owned_by,
            owner_name,
            request_id,
        } = value;
        Item {
            item_id,
            item_name,
            description,
            available,
            owner: ItemOwner {
                owner_id: owned_by,
                owner_name,
            },
            request_id,
        }
    }
}
