use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::{ItemRequestId, UserId},
        list::Pagination,
        request::{event::CreateItemRequest, ItemRequest},
    },
    repository::request::ItemRequestRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::request::ItemRequestRow, write_error, ConnectionPool};

#[derive(new)]
pub struct ItemRequestRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ItemRequestRepository for ItemRequestRepositoryImpl {
    async fn create(&self, event: CreateItemRequest) -> AppResult<ItemRequest> {
        let row = sqlx::query_as::<_, ItemRequestRow>(
            r#"
                INSERT INTO item_requests (description, requester_id, created_at)
                VALUES ($1, $2, $3)
                RETURNING request_id, description, requester_id, created_at
            "#,
        )
        .bind(&event.description)
        .bind(event.requester_id)
        .bind(event.created_at)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(|e| write_error(e, || format!("User {} no longer exists", event.requester_id)))?;

        Ok(ItemRequest::from(row))
    }

    async fn find_by_id(&self, request_id: ItemRequestId) -> AppResult<Option<ItemRequest>> {
        let row = sqlx::query_as::<_, ItemRequestRow>(
            r#"
                SELECT request_id, description, requester_id, created_at
                FROM item_requests
                WHERE request_id = $1
            "#,
        )
        .bind(request_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(ItemRequest::from))
    }

    async fn find_by_requester(&self, requester_id: UserId) -> AppResult<Vec<ItemRequest>> {
        let rows = sqlx::query_as::<_, ItemRequestRow>(
            r#"
                SELECT request_id, description, requester_id, created_at
                FROM item_requests
                WHERE requester_id = $1
                ORDER BY created_at DESC, request_id DESC
            "#,
        )
        .bind(requester_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(ItemRequest::from).collect())
    }

    async fn find_others(
        &self,
        requester_id: UserId,
        pagination: Pagination,
    ) -> AppResult<Vec<ItemRequest>> {
        let rows = sqlx::query_as::<_, ItemRequestRow>(
            r#"
                SELECT request_id, description, requester_id, created_at
                FROM item_requests
                WHERE requester_id <> $1
                ORDER BY created_at ASC, request_id ASC
                LIMIT $2
                OFFSET $3
            "#,
        )
        .bind(requester_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(ItemRequest::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::user::UserRepositoryImpl;
    use chrono::{Duration, Utc};
    use kernel::{model::user::event::CreateUser, repository::user::UserRepository};

    #[sqlx::test]
    #[cfg_attr(not(database_tests), ignore = "requires DATABASE_URL")]
    async fn test_own_and_other_requests(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let users = UserRepositoryImpl::new(db.clone());
        let repo = ItemRequestRepositoryImpl::new(db);

        let me = users
            .create(CreateUser::new("me".into(), "me@example.com".into()))
            .await?;
        let other = users
            .create(CreateUser::new("other".into(), "other@example.com".into()))
            .await?;

        let now = Utc::now();
        let older = repo
            .create(CreateItemRequest::new(
                me.user_id,
                "older".into(),
                now - Duration::days(1),
            ))
            .await?;
        let newer = repo
            .create(CreateItemRequest::new(me.user_id, "newer".into(), now))
            .await?;
        for n in 0..3 {
            repo.create(CreateItemRequest::new(
                other.user_id,
                format!("other{n}"),
                now + Duration::minutes(n),
            ))
            .await?;
        }

        let own = repo.find_by_requester(me.user_id).await?;
        let own_ids: Vec<_> = own.iter().map(|r| r.request_id).collect();
        assert_eq!(own_ids, vec![newer.request_id, older.request_id]);

        let others = repo
            .find_others(me.user_id, Pagination::new(0, 2))
            .await?;
        let texts: Vec<_> = others.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(texts, vec!["other0", "other1"]);

        let rest = repo
            .find_others(me.user_id, Pagination::new(2, 2))
            .await?;
        assert_eq!(rest.len(), 1);

        assert_eq!(repo.find_by_id(older.request_id).await?, Some(older));
        Ok(())
    }
}
