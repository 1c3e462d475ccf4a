use axum::{
    extract::{Path, Query, State},
    Json,
};
use garde::Validate;
use kernel::model::id::ItemRequestId;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::SharerUser,
    model::{
        request::{CreateItemRequestRequest, ItemRequestResponse},
        PaginationQuery,
    },
};

pub async fn register_item_request(
    user: SharerUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateItemRequestRequest>,
) -> AppResult<Json<ItemRequestResponse>> {
    req.validate(&())?;

    registry
        .item_request_service()
        .create(user.id(), req.description)
        .await
        .map(ItemRequestResponse::from)
        .map(Json)
}

pub async fn show_own_item_request_list(
    user: SharerUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<ItemRequestResponse>>> {
    registry
        .item_request_service()
        .find_own(user.id())
        .await
        .map(|requests| requests.into_iter().map(ItemRequestResponse::from).collect())
        .map(Json)
}

pub async fn show_other_item_request_list(
    user: SharerUser,
    Query(query): Query<PaginationQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<ItemRequestResponse>>> {
    query.validate(&())?;

    registry
        .item_request_service()
        .find_others(user.id(), query.into())
        .await
        .map(|requests| requests.into_iter().map(ItemRequestResponse::from).collect())
        .map(Json)
}

pub async fn show_item_request(
    user: SharerUser,
    Path(request_id): Path<ItemRequestId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ItemRequestResponse>> {
    registry
        .item_request_service()
        .find_by_id(user.id(), request_id)
        .await
        .map(ItemRequestResponse::from)
        .map(Json)
}
