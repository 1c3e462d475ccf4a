use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::ItemId,
    review::{event::CreateReview, Review},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, event: CreateReview) -> AppResult<Review>;
    // 作成日時の昇順
    async fn find_by_item(&self, item_id: ItemId) -> AppResult<Vec<Review>>;
}
