use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::{ItemId, ItemRequestId, UserId},
        item::{event::CreateItem, Item},
        list::Pagination,
    },
    repository::item::ItemRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::item::ItemRow, write_error, ConnectionPool};

#[derive(new)]
pub struct ItemRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ItemRepository for ItemRepositoryImpl {
    async fn create(&self, event: CreateItem, owner_id: UserId) -> AppResult<Item> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
                WITH inserted AS (
                    INSERT INTO items (item_name, description, available, owned_by, request_id)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING item_id, item_name, description, available, owned_by, request_id
                )
                SELECT
                    i.item_id,
                    i.item_name,
                    i.description,
                    i.available,
                    i.owned_by,
                    u.user_name AS owner_name,
                    i.request_id
                FROM inserted AS i
                INNER JOIN users AS u ON i.owned_by = u.user_id
            "#,
        )
        .bind(&event.item_name)
        .bind(&event.description)
        .bind(event.available)
        .bind(owner_id)
        .bind(event.request_id)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(|e| {
            write_error(e, || {
                format!("Item owner {owner_id} or its request no longer exists")
            })
        })?;

        Ok(Item::from(row))
    }

    async fn find_by_id(&self, item_id: ItemId) -> AppResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
                SELECT
                    i.item_id,
                    i.item_name,
                    i.description,
                    i.available,
                    i.owned_by,
                    u.user_name AS owner_name,
                    i.request_id
                FROM items AS i
                INNER JOIN users AS u ON i.owned_by = u.user_id
                WHERE i.item_id = $1
            "#,
        )
        .bind(item_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Item::from))
    }

    async fn update(&self, item: Item) -> AppResult<Item> {
        // 所有者は変更しない
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
                WITH updated AS (
                    UPDATE items
                    SET item_name = $1, description = $2, available = $3
                    WHERE item_id = $4
                    RETURNING item_id, item_name, description, available, owned_by, request_id
                )
                SELECT
                    i.item_id,
                    i.item_name,
                    i.description,
                    i.available,
                    i.owned_by,
                    u.user_name AS owner_name,
                    i.request_id
                FROM updated AS i
                INNER JOIN users AS u ON i.owned_by = u.user_id
            "#,
        )
        .bind(&item.item_name)
        .bind(&item.description)
        .bind(item.available)
        .bind(item.item_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Item::from).ok_or_else(|| {
            AppError::NoRowsAffectedError(format!("No item record has been updated: {}", item.item_id))
        })
    }

    async fn find_by_owner(
        &self,
        owner_id: UserId,
        pagination: Pagination,
    ) -> AppResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
                SELECT
                    i.item_id,
                    i.item_name,
                    i.description,
                    i.available,
                    i.owned_by,
                    u.user_name AS owner_name,
                    i.request_id
                FROM items AS i
                INNER JOIN users AS u ON i.owned_by = u.user_id
                WHERE i.owned_by = $1
                ORDER BY i.item_id ASC
                LIMIT $2
                OFFSET $3
            "#,
        )
        .bind(owner_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn search(&self, text: &str, pagination: Pagination) -> AppResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
                SELECT
                    i.item_id,
                    i.item_name,
                    i.description,
                    i.available,
                    i.owned_by,
                    u.user_name AS owner_name,
                    i.request_id
                FROM items AS i
                INNER JOIN users AS u ON i.owned_by = u.user_id
                WHERE i.available
                  AND (i.item_name ILIKE $1 ESCAPE '\' OR i.description ILIKE $1 ESCAPE '\')
                ORDER BY i.item_id ASC
                LIMIT $2
                OFFSET $3
            "#,
        )
        .bind(contains_pattern(text))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn find_by_request_ids(&self, request_ids: Vec<ItemRequestId>) -> AppResult<Vec<Item>> {
        if request_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = request_ids.into_iter().map(ItemRequestId::raw).collect();

        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
                SELECT
                    i.item_id,
                    i.item_name,
                    i.description,
                    i.available,
                    i.owned_by,
                    u.user_name AS owner_name,
                    i.request_id
                FROM items AS i
                INNER JOIN users AS u ON i.owned_by = u.user_id
                WHERE i.request_id = ANY($1)
                ORDER BY i.item_id ASC
            "#,
        )
        .bind(ids)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Item::from).collect())
    }
}

// 部分一致用の LIKE パターン。ワイルドカード文字はエスケープする
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
