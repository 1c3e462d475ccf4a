use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    booking::BookingSummary,
    id::{BookingId, ItemId, ItemRequestId, ReviewId, UserId},
    item::{
        event::{CreateItem, UpdateItem},
        Item, ItemDetail,
    },
    list::Pagination,
    review::Review,
};
use serde::{Deserialize, Serialize};

use super::{default_from, default_size, not_blank, not_blank_if_present};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[garde(custom(not_blank))]
    #[serde(default)]
    pub name: String,
    #[garde(custom(not_blank))]
    #[serde(default)]
    pub description: String,
    #[garde(required)]
    pub available: Option<bool>,
    #[garde(skip)]
    pub request_id: Option<ItemRequestId>,
}

impl From<CreateItemRequest> for CreateItem {
    fn from(value: CreateItemRequest) -> Self {
        let CreateItemRequest {
            name,
            description,
            available,
            request_id,
        } = value;
        CreateItem::new(name, description, available.unwrap_or(false), request_id)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    #[garde(custom(not_blank_if_present))]
    pub name: Option<String>,
    #[garde(custom(not_blank_if_present))]
    pub description: Option<String>,
    #[garde(skip)]
    pub available: Option<bool>,
}

impl UpdateItemRequest {
    pub fn into_event(self, item_id: ItemId, requested_user: UserId) -> UpdateItem {
        UpdateItem::new(
            item_id,
            requested_user,
            self.name,
            self.description,
            self.available,
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ItemSearchQuery {
    #[garde(skip)]
    #[serde(default)]
    pub text: String,
    #[garde(range(min = 0))]
    #[serde(default = "default_from")]
    pub from: i64,
    #[garde(range(min = 1))]
    #[serde(default = "default_size")]
    pub size: i64,
}

impl ItemSearchQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.from, self.size)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[garde(custom(not_blank))]
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<ItemRequestId>,
}

impl From<Item> for ItemResponse {
    fn from(value: Item) -> Self {
        let Item {
            item_id,
            item_name,
            description,
            available,
            request_id,
            ..
        } = value;
        Self {
            id: item_id,
            name: item_name,
            description,
            available,
            request_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummaryResponse {
    pub id: BookingId,
    pub booker_id: UserId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<BookingSummary> for BookingSummaryResponse {
    fn from(value: BookingSummary) -> Self {
        let BookingSummary {
            booking_id,
            booker_id,
            start_at,
            end_at,
        } = value;
        Self {
            id: booking_id,
            booker_id,
            start: start_at,
            end: end_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: ReviewId,
    pub text: String,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

impl From<Review> for CommentResponse {
    fn from(value: Review) -> Self {
        let Review {
            review_id,
            text,
            author,
            created_at,
            ..
        } = value;
        Self {
            id: review_id,
            text,
            author_name: author.author_name,
            created: created_at,
        }
    }
}

// 所有者以外には lastBooking / nextBooking のキー自体を返さない
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetailResponse {
    #[serde(flatten)]
    pub item: ItemResponse,
    pub comments: Vec<CommentResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_booking: Option<Option<BookingSummaryResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_booking: Option<Option<BookingSummaryResponse>>,
}

impl From<ItemDetail> for ItemDetailResponse {
    fn from(value: ItemDetail) -> Self {
        let ItemDetail {
            item,
            bookings,
            reviews,
        } = value;
        let (last_booking, next_booking) = match bookings {
            Some(bookings) => (
                Some(bookings.last_booking.map(BookingSummaryResponse::from)),
                Some(bookings.next_booking.map(BookingSummaryResponse::from)),
            ),
            None => (None, None),
        };
        Self {
            item: item.into(),
            comments: reviews.into_iter().map(CommentResponse::from).collect(),
            last_booking,
            next_booking,
        }
    }
}
