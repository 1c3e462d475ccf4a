use shared::error::{AppError, AppResult};

use crate::{
    model::{id::UserId, user::User},
    repository::user::UserRepository,
};

pub mod booking;
pub mod item;
pub mod request;
pub mod review;
pub mod user;

#[cfg(test)]
pub(crate) mod fixture;

// 他のエンティティ操作の前提としてユーザーの存在を確認する
pub(crate) async fn find_user(repository: &dyn UserRepository, user_id: UserId) -> AppResult<User> {
    repository
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("User {user_id} not found")))
}
