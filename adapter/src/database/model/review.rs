use chrono::{DateTime, Utc};
use kernel::model::{
    id::{ItemId, ReviewId, UserId},
    review::{Review, ReviewAuthor},
};

#[derive(sqlx::FromRow)]
pub struct ReviewRow {
    pub review_id: ReviewId,
    pub text: String,
    pub item_id: ItemId,
    pub author_id: UserId,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(value: ReviewRow) -> Self {
        let ReviewRow {
            review_id,
            text,
            item_id,
            author_id,
            author_name,
            created_at,
        } = value;
        Review {
            review_id,
            text,
            item_id,
            author: ReviewAuthor {
                author_id,
                author_name,
            },
            created_at,
        }
    }
}
