use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::ItemId,
        review::{event::CreateReview, Review},
    },
    repository::review::ReviewRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::review::ReviewRow, write_error, ConnectionPool};

#[derive(new)]
pub struct ReviewRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReviewRepository for ReviewRepositoryImpl {
    async fn create(&self, event: CreateReview) -> AppResult<Review> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
                WITH inserted AS (
                    INSERT INTO reviews (text, item_id, author_id, created_at)
                    VALUES ($1, $2, $3, $4)
                    RETURNING review_id, text, item_id, author_id, created_at
                )
                SELECT
                    r.review_id,
                    r.text,
                    r.item_id,
                    r.author_id,
                    u.user_name AS author_name,
                    r.created_at
                FROM inserted AS r
                INNER JOIN users AS u ON r.author_id = u.user_id
            "#,
        )
        .bind(&event.text)
        .bind(event.item_id)
        .bind(event.author_id)
        .bind(event.created_at)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(|e| {
            write_error(e, || {
                format!(
                    "Item {} or user {} no longer exists",
                    event.item_id, event.author_id
                )
            })
        })?;

        Ok(Review::from(row))
    }

    async fn find_by_item(&self, item_id: ItemId) -> AppResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
                SELECT
                    r.review_id,
                    r.text,
                    r.item_id,
                    r.author_id,
                    u.user_name AS author_name,
                    r.created_at
                FROM reviews AS r
                INNER JOIN users AS u ON r.author_id = u.user_id
                WHERE r.item_id = $1
                ORDER BY r.created_at ASC, r.review_id ASC
            "#,
        )
        .bind(item_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Review::from).collect())
    }
}
