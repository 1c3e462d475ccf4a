use crate::model::id::{ItemId, ReviewId, UserId};
use chrono::{DateTime, Utc};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub review_id: ReviewId,
    pub text: String,
    pub item_id: ItemId,
    pub author: ReviewAuthor,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewAuthor {
    pub author_id: UserId,
    pub author_name: String,
}
