use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::UserId, user::event::DeleteUser};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::model::user::{CreateUserRequest, UpdateUserRequest, UserResponse};

pub async fn register_user(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    req.validate(&())?;

    registry
        .user_service()
        .create(req.into())
        .await
        .map(UserResponse::from)
        .map(Json)
}

pub async fn update_user(
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    req.validate(&())?;

    registry
        .user_service()
        .update(req.into_event(user_id))
        .await
        .map(UserResponse::from)
        .map(Json)
}

pub async fn delete_user(
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .user_service()
        .delete(DeleteUser::new(user_id))
        .await
        .map(|_| StatusCode::OK)
}

pub async fn show_user(
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UserResponse>> {
    registry
        .user_service()
        .find_by_id(user_id)
        .await
        .map(UserResponse::from)
        .map(Json)
}

pub async fn show_user_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<UserResponse>>> {
    registry
        .user_service()
        .find_all()
        .await
        .map(|users| users.into_iter().map(UserResponse::from).collect())
        .map(Json)
}
