use crate::model::id::{ItemId, UserId};
use chrono::{DateTime, Utc};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateReview {
    pub item_id: ItemId,
    pub author_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
