use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::{
    model::{
        id::{ItemRequestId, UserId},
        item::Item,
        list::Pagination,
        request::{event::CreateItemRequest, ItemRequest, ItemRequestWithItems},
    },
    repository::{item::ItemRepository, request::ItemRequestRepository, user::UserRepository},
};

use super::find_user;

#[derive(new)]
pub struct ItemRequestService {
    request_repository: Arc<dyn ItemRequestRepository>,
    user_repository: Arc<dyn UserRepository>,
    item_repository: Arc<dyn ItemRepository>,
}

impl ItemRequestService {
    pub async fn create(&self, requester_id: UserId, description: String) -> AppResult<ItemRequest> {
        find_user(self.user_repository.as_ref(), requester_id).await?;
        self.request_repository
            .create(CreateItemRequest::new(requester_id, description, Utc::now()))
            .await
    }

    pub async fn find_own(&self, requester_id: UserId) -> AppResult<Vec<ItemRequestWithItems>> {
        find_user(self.user_repository.as_ref(), requester_id).await?;
        let requests = self
            .request_repository
            .find_by_requester(requester_id)
            .await?;
        self.attach_items(requests).await
    }

    pub async fn find_others(
        &self,
        requester_id: UserId,
        pagination: Pagination,
    ) -> AppResult<Vec<ItemRequestWithItems>> {
        find_user(self.user_repository.as_ref(), requester_id).await?;
        let requests = self
            .request_repository
            .find_others(requester_id, pagination)
            .await?;
        self.attach_items(requests).await
    }

    pub async fn find_by_id(
        &self,
        requester_id: UserId,
        request_id: ItemRequestId,
    ) -> AppResult<ItemRequestWithItems> {
        find_user(self.user_repository.as_ref(), requester_id).await?;
        let request = self
            .request_repository
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("Item request {request_id} not found")))?;

        let mut attached = self.attach_items(vec![request]).await?;
        attached
            .pop()
            .ok_or_else(|| AppError::EntityNotFound(format!("Item request {request_id} not found")))
    }

    // 並び順を保ったまま、各リクエストに応じたアイテムを 1 回のクエリでまとめて取得する
    async fn attach_items(&self, requests: Vec<ItemRequest>) -> AppResult<Vec<ItemRequestWithItems>> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let ids = requests.iter().map(|r| r.request_id).collect();
        let mut items_by_request: HashMap<ItemRequestId, Vec<Item>> = HashMap::new();
        for item in self.item_repository.find_by_request_ids(ids).await? {
            if let Some(request_id) = item.request_id {
                items_by_request.entry(request_id).or_default().push(item);
            }
        }

        Ok(requests
            .into_iter()
            .map(|request| {
                let items = items_by_request
                    .remove(&request.request_id)
                    .unwrap_or_default();
                ItemRequestWithItems { request, items }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        repository::{
            item::MockItemRepository, request::MockItemRequestRepository,
            user::MockUserRepository,
        },
        service::fixture::{days_from_now, item, user},
    };
    use mockall::predicate::eq;

    fn request(id: i64, requester_id: i64) -> ItemRequest {
        ItemRequest {
            request_id: ItemRequestId::new(id),
            description: format!("looking for thing {id}"),
            requester_id: UserId::new(requester_id),
            created_at: days_from_now(-id),
        }
    }

    fn fulfilling_item(id: i64, request_id: i64) -> Item {
        let mut it = item(id, 9, true);
        it.request_id = Some(ItemRequestId::new(request_id));
        it
    }

    fn known_users() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id.raw()))));
        users
    }

    fn service(
        requests: MockItemRequestRepository,
        users: MockUserRepository,
        items: MockItemRepository,
    ) -> ItemRequestService {
        ItemRequestService::new(Arc::new(requests), Arc::new(users), Arc::new(items))
    }

    #[tokio::test]
    async fn create_requires_known_requester() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        let mut requests = MockItemRequestRepository::new();
        requests.expect_create().never();

        let res = service(requests, users, MockItemRepository::new())
            .create(UserId::new(1), "need a ladder".into())
            .await;

        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn create_stamps_requester_and_time() {
        let mut requests = MockItemRequestRepository::new();
        requests.expect_create().times(1).returning(|event| {
            Ok(ItemRequest {
                request_id: ItemRequestId::new(1),
                description: event.description,
                requester_id: event.requester_id,
                created_at: event.created_at,
            })
        });

        let created = service(requests, known_users(), MockItemRepository::new())
            .create(UserId::new(4), "need a ladder".into())
            .await
            .unwrap();

        assert_eq!(created.requester_id, UserId::new(4));
        assert_eq!(created.description, "need a ladder");
    }

    #[tokio::test]
    async fn own_requests_keep_order_and_get_their_items() {
        let mut requests = MockItemRequestRepository::new();
        requests
            .expect_find_by_requester()
            .with(eq(UserId::new(1)))
            .returning(|_| Ok(vec![request(1, 1), request(2, 1)]));
        let mut items = MockItemRepository::new();
        items
            .expect_find_by_request_ids()
            .withf(|ids| ids == &vec![ItemRequestId::new(1), ItemRequestId::new(2)])
            .returning(|_| Ok(vec![fulfilling_item(10, 2), fulfilling_item(11, 2)]));

        let found = service(requests, known_users(), items)
            .find_own(UserId::new(1))
            .await
            .unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].request.request_id, ItemRequestId::new(1));
        assert!(found[0].items.is_empty());
        assert_eq!(found[1].items.len(), 2);
    }

    #[tokio::test]
    async fn no_requests_means_no_item_lookup() {
        let mut requests = MockItemRequestRepository::new();
        requests.expect_find_others().returning(|_, _| Ok(vec![]));
        let mut items = MockItemRepository::new();
        items.expect_find_by_request_ids().never();

        let found = service(requests, known_users(), items)
            .find_others(UserId::new(1), Pagination::default())
            .await
            .unwrap();

        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn others_excludes_requester() {
        let mut requests = MockItemRequestRepository::new();
        requests
            .expect_find_others()
            .with(eq(UserId::new(1)), eq(Pagination::new(0, 10)))
            .times(1)
            .returning(|_, _| Ok(vec![request(3, 2)]));
        let mut items = MockItemRepository::new();
        items
            .expect_find_by_request_ids()
            .returning(|_| Ok(vec![fulfilling_item(12, 3)]));

        let found = service(requests, known_users(), items)
            .find_others(UserId::new(1), Pagination::new(0, 10))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].request.requester_id, UserId::new(2));
        assert_eq!(found[0].items[0].item_id.raw(), 12);
    }

    #[tokio::test]
    async fn single_request_of_anyone_is_readable() {
        let mut requests = MockItemRequestRepository::new();
        requests
            .expect_find_by_id()
            .returning(|id| Ok(Some(request(id.raw(), 7))));
        let mut items = MockItemRepository::new();
        items.expect_find_by_request_ids().returning(|_| Ok(vec![]));

        let found = service(requests, known_users(), items)
            .find_by_id(UserId::new(1), ItemRequestId::new(5))
            .await
            .unwrap();

        assert_eq!(found.request.requester_id, UserId::new(7));
    }

    #[tokio::test]
    async fn unknown_request_is_not_found() {
        let mut requests = MockItemRequestRepository::new();
        requests.expect_find_by_id().returning(|_| Ok(None));

        let res = service(requests, known_users(), MockItemRepository::new())
            .find_by_id(UserId::new(1), ItemRequestId::new(5))
            .await;

        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }
}
