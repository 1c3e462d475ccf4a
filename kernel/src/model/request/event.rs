use crate::model::id::UserId;
use chrono::{DateTime, Utc};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateItemRequest {
    pub requester_id: UserId,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
