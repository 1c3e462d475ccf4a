use axum::{
    extract::{Path, Query, State},
    Json,
};
use garde::Validate;
use kernel::model::id::ItemId;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::SharerUser,
    model::{
        item::{
            CommentResponse, CreateCommentRequest, CreateItemRequest, ItemDetailResponse,
            ItemResponse, ItemSearchQuery, UpdateItemRequest,
        },
        PaginationQuery,
    },
};

pub async fn register_item(
    user: SharerUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateItemRequest>,
) -> AppResult<Json<ItemResponse>> {
    req.validate(&())?;

    registry
        .item_service()
        .create(user.id(), req.into())
        .await
        .map(ItemResponse::from)
        .map(Json)
}

pub async fn update_item(
    user: SharerUser,
    Path(item_id): Path<ItemId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateItemRequest>,
) -> AppResult<Json<ItemResponse>> {
    req.validate(&())?;

    registry
        .item_service()
        .update(req.into_event(item_id, user.id()))
        .await
        .map(ItemResponse::from)
        .map(Json)
}

pub async fn show_item(
    user: SharerUser,
    Path(item_id): Path<ItemId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ItemDetailResponse>> {
    registry
        .item_service()
        .find_detail(item_id, user.id())
        .await
        .map(ItemDetailResponse::from)
        .map(Json)
}

pub async fn show_owned_item_list(
    user: SharerUser,
    Query(query): Query<PaginationQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<ItemDetailResponse>>> {
    query.validate(&())?;

    registry
        .item_service()
        .find_by_owner(user.id(), query.into())
        .await
        .map(|items| items.into_iter().map(ItemDetailResponse::from).collect())
        .map(Json)
}

pub async fn search_items(
    Query(query): Query<ItemSearchQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<ItemResponse>>> {
    query.validate(&())?;

    registry
        .item_service()
        .search(&query.text, query.pagination())
        .await
        .map(|items| items.into_iter().map(ItemResponse::from).collect())
        .map(Json)
}

pub async fn register_comment(
    user: SharerUser,
    Path(item_id): Path<ItemId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateCommentRequest>,
) -> AppResult<Json<CommentResponse>> {
    req.validate(&())?;

    registry
        .review_service()
        .create(user.id(), item_id, req.text)
        .await
        .map(CommentResponse::from)
        .map(Json)
}
