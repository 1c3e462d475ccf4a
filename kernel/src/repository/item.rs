use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::{ItemId, ItemRequestId, UserId},
    item::{event::CreateItem, Item},
    list::Pagination,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create(&self, event: CreateItem, owner_id: UserId) -> AppResult<Item>;
    async fn find_by_id(&self, item_id: ItemId) -> AppResult<Option<Item>>;
    // 所有者は変更しない
    async fn update(&self, item: Item) -> AppResult<Item>;
    // アイテム ID の昇順
    async fn find_by_owner(&self, owner_id: UserId, pagination: Pagination)
        -> AppResult<Vec<Item>>;
    // 貸出可能なアイテムのうち、名前か説明に text を含むもの（大文字小文字を区別しない）
    async fn search(&self, text: &str, pagination: Pagination) -> AppResult<Vec<Item>>;
    async fn find_by_request_ids(&self, request_ids: Vec<ItemRequestId>) -> AppResult<Vec<Item>>;
}
