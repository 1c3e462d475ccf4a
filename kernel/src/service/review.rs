use std::sync::Arc;

use chrono::Utc;
use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::{
    model::{
        id::{ItemId, UserId},
        review::{event::CreateReview, Review},
    },
    repository::{
        booking::BookingRepository, item::ItemRepository, review::ReviewRepository,
        user::UserRepository,
    },
};

use super::find_user;

#[derive(new)]
pub struct ReviewService {
    review_repository: Arc<dyn ReviewRepository>,
    item_repository: Arc<dyn ItemRepository>,
    user_repository: Arc<dyn UserRepository>,
    booking_repository: Arc<dyn BookingRepository>,
}

impl ReviewService {
    /// 承認済みで終了した予約がある利用者だけがレビューを書ける。
    pub async fn create(&self, author_id: UserId, item_id: ItemId, text: String) -> AppResult<Review> {
        self.item_repository
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("Item {item_id} not found")))?;
        find_user(self.user_repository.as_ref(), author_id).await?;

        let now = Utc::now();
        if !self
            .booking_repository
            .exists_completed(author_id, item_id, now)
            .await?
        {
            return Err(AppError::ValidationError(format!(
                "User {author_id} has no completed booking of item {item_id}"
            )));
        }

        let review = self
            .review_repository
            .create(CreateReview::new(item_id, author_id, text, now))
            .await?;
        tracing::info!(review_id = %review.review_id, item_id = %item_id, "review accepted");
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{id::ReviewId, review::ReviewAuthor},
        repository::{
            booking::MockBookingRepository, item::MockItemRepository,
            review::MockReviewRepository, user::MockUserRepository,
        },
        service::fixture::{item, user},
    };
    use mockall::predicate::{always, eq};

    fn service(
        reviews: MockReviewRepository,
        items: MockItemRepository,
        users: MockUserRepository,
        bookings: MockBookingRepository,
    ) -> ReviewService {
        ReviewService::new(
            Arc::new(reviews),
            Arc::new(items),
            Arc::new(users),
            Arc::new(bookings),
        )
    }

    fn known_item() -> MockItemRepository {
        let mut items = MockItemRepository::new();
        items
            .expect_find_by_id()
            .returning(|id| Ok(Some(item(id.raw(), 1, true))));
        items
    }

    fn known_users() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id.raw()))));
        users
    }

    #[tokio::test]
    async fn review_after_completed_booking_is_stored() {
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_exists_completed()
            .with(eq(UserId::new(2)), eq(ItemId::new(1)), always())
            .returning(|_, _, _| Ok(true));
        let mut reviews = MockReviewRepository::new();
        reviews.expect_create().times(1).returning(|event| {
            Ok(Review {
                review_id: ReviewId::new(1),
                text: event.text,
                item_id: event.item_id,
                author: ReviewAuthor {
                    author_id: event.author_id,
                    author_name: "user2".into(),
                },
                created_at: event.created_at,
            })
        });

        let review = service(reviews, known_item(), known_users(), bookings)
            .create(UserId::new(2), ItemId::new(1), "great drill".into())
            .await
            .unwrap();

        assert_eq!(review.text, "great drill");
        assert_eq!(review.author.author_name, "user2");
    }

    #[tokio::test]
    async fn review_without_completed_booking_is_rejected() {
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_exists_completed()
            .returning(|_, _, _| Ok(false));
        let mut reviews = MockReviewRepository::new();
        reviews.expect_create().never();

        let res = service(reviews, known_item(), known_users(), bookings)
            .create(UserId::new(3), ItemId::new(1), "never used it".into())
            .await;

        assert!(matches!(res, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn review_of_unknown_item_is_not_found() {
        let mut items = MockItemRepository::new();
        items.expect_find_by_id().returning(|_| Ok(None));
        let mut reviews = MockReviewRepository::new();
        reviews.expect_create().never();

        let res = service(reviews, items, known_users(), MockBookingRepository::new())
            .create(UserId::new(2), ItemId::new(404), "?".into())
            .await;

        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn review_by_unknown_author_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        let mut reviews = MockReviewRepository::new();
        reviews.expect_create().never();

        let res = service(reviews, known_item(), users, MockBookingRepository::new())
            .create(UserId::new(404), ItemId::new(1), "?".into())
            .await;

        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }
}
