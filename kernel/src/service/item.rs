use std::sync::Arc;

use chrono::Utc;
use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::{
    model::{
        id::{ItemId, UserId},
        item::{
            event::{CreateItem, UpdateItem},
            Item, ItemBookings, ItemDetail,
        },
        list::Pagination,
    },
    repository::{
        booking::BookingRepository, item::ItemRepository, request::ItemRequestRepository,
        review::ReviewRepository, user::UserRepository,
    },
};

use super::find_user;

#[derive(new)]
pub struct ItemService {
    item_repository: Arc<dyn ItemRepository>,
    user_repository: Arc<dyn UserRepository>,
    booking_repository: Arc<dyn BookingRepository>,
    review_repository: Arc<dyn ReviewRepository>,
    request_repository: Arc<dyn ItemRequestRepository>,
}

impl ItemService {
    pub async fn create(&self, owner_id: UserId, event: CreateItem) -> AppResult<Item> {
        find_user(self.user_repository.as_ref(), owner_id).await?;
        if let Some(request_id) = event.request_id {
            self.request_repository
                .find_by_id(request_id)
                .await?
                .ok_or_else(|| {
                    AppError::EntityNotFound(format!("Item request {request_id} not found"))
                })?;
        }
        self.item_repository.create(event, owner_id).await
    }

    pub async fn update(&self, event: UpdateItem) -> AppResult<Item> {
        let UpdateItem {
            item_id,
            requested_user,
            item_name,
            description,
            available,
        } = event;

        let mut item = self.find_item(item_id).await?;
        // 所有者以外からの更新は存在しないアイテムとして扱う
        if !item.is_owned_by(requested_user) {
            return Err(AppError::EntityNotFound(format!("Item {item_id} not found")));
        }

        if let Some(item_name) = item_name {
            item.item_name = item_name;
        }
        if let Some(description) = description {
            item.description = description;
        }
        if let Some(available) = available {
            item.available = available;
        }

        self.item_repository.update(item).await
    }

    pub async fn find_detail(&self, item_id: ItemId, requested_user: UserId) -> AppResult<ItemDetail> {
        let item = self.find_item(item_id).await?;
        let with_bookings = item.is_owned_by(requested_user);
        self.build_detail(item, with_bookings).await
    }

    pub async fn find_by_owner(
        &self,
        owner_id: UserId,
        pagination: Pagination,
    ) -> AppResult<Vec<ItemDetail>> {
        let mut items = self
            .item_repository
            .find_by_owner(owner_id, pagination)
            .await?;
        items.sort_by_key(|item| item.item_id);

        let mut details = Vec::with_capacity(items.len());
        for item in items {
            details.push(self.build_detail(item, true).await?);
        }
        Ok(details)
    }

    pub async fn search(&self, text: &str, pagination: Pagination) -> AppResult<Vec<Item>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.item_repository.search(text, pagination).await
    }

    async fn find_item(&self, item_id: ItemId) -> AppResult<Item> {
        self.item_repository
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("Item {item_id} not found")))
    }

    async fn build_detail(&self, item: Item, with_bookings: bool) -> AppResult<ItemDetail> {
        let reviews = self.review_repository.find_by_item(item.item_id).await?;
        let bookings = if with_bookings {
            let now = Utc::now();
            Some(ItemBookings {
                last_booking: self
                    .booking_repository
                    .find_last_for_item(item.item_id, now)
                    .await?,
                next_booking: self
                    .booking_repository
                    .find_next_for_item(item.item_id, now)
                    .await?,
            })
        } else {
            None
        };
        Ok(ItemDetail {
            item,
            bookings,
            reviews,
        })
    }
}
