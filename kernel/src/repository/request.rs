use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::{ItemRequestId, UserId},
    list::Pagination,
    request::{event::CreateItemRequest, ItemRequest},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRequestRepository: Send + Sync {
    async fn create(&self, event: CreateItemRequest) -> AppResult<ItemRequest>;
    async fn find_by_id(&self, request_id: ItemRequestId) -> AppResult<Option<ItemRequest>>;
    // 作成日時の降順
    async fn find_by_requester(&self, requester_id: UserId) -> AppResult<Vec<ItemRequest>>;
    // requester_id 以外のユーザーのリクエストを作成日時の昇順で
    async fn find_others(
        &self,
        requester_id: UserId,
        pagination: Pagination,
    ) -> AppResult<Vec<ItemRequest>>;
}
