use std::sync::Arc;

use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::{
    model::{
        id::UserId,
        user::{
            event::{CreateUser, DeleteUser, UpdateUser},
            User,
        },
    },
    repository::user::UserRepository,
};

use super::find_user;

#[derive(new)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub async fn create(&self, event: CreateUser) -> AppResult<User> {
        self.ensure_email_is_free(&event.email, None).await?;
        self.user_repository.create(event).await
    }

    pub async fn update(&self, event: UpdateUser) -> AppResult<User> {
        let UpdateUser {
            user_id,
            user_name,
            email,
        } = event;
        let mut user = find_user(self.user_repository.as_ref(), user_id).await?;

        if let Some(email) = email {
            if email != user.email {
                self.ensure_email_is_free(&email, Some(user_id)).await?;
            }
            user.email = email;
        }
        if let Some(user_name) = user_name {
            user.user_name = user_name;
        }

        self.user_repository.update(user).await
    }

    pub async fn delete(&self, event: DeleteUser) -> AppResult<()> {
        find_user(self.user_repository.as_ref(), event.user_id).await?;
        self.user_repository.delete(event).await
    }

    pub async fn find_by_id(&self, user_id: UserId) -> AppResult<User> {
        find_user(self.user_repository.as_ref(), user_id).await
    }

    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        self.user_repository.find_all().await
    }

    async fn ensure_email_is_free(&self, email: &str, except: Option<UserId>) -> AppResult<()> {
        match self.user_repository.find_by_email(email).await? {
            Some(other) if Some(other.user_id) != except => Err(AppError::Conflict(format!(
                "Email {email} is already in use"
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{repository::user::MockUserRepository, service::fixture::user};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(user(1))));
        users.expect_create().never();

        let service = UserService::new(Arc::new(users));
        let res = service
            .create(CreateUser::new("another".into(), "user1@example.com".into()))
            .await;

        assert!(matches!(res, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn create_persists_new_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_create()
            .times(1)
            .returning(|event| {
                Ok(User {
                    user_id: UserId::new(10),
                    user_name: event.user_name,
                    email: event.email,
                })
            });

        let service = UserService::new(Arc::new(users));
        let created = service
            .create(CreateUser::new("alice".into(), "alice@example.com".into()))
            .await
            .unwrap();

        assert_eq!(created.user_id, UserId::new(10));
        assert_eq!(created.email, "alice@example.com");
    }

    #[tokio::test]
    async fn update_only_overwrites_supplied_fields() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(UserId::new(1)))
            .returning(|id| Ok(Some(user(id.raw()))));
        users.expect_find_by_email().never();
        users.expect_update().returning(Ok);

        let service = UserService::new(Arc::new(users));
        let updated = service
            .update(UpdateUser::new(UserId::new(1), Some("renamed".into()), None))
            .await
            .unwrap();

        assert_eq!(updated.user_name, "renamed");
        assert_eq!(updated.email, "user1@example.com");
    }

    #[tokio::test]
    async fn update_rejects_email_of_another_user() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id.raw()))));
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(user(2))));
        users.expect_update().never();

        let service = UserService::new(Arc::new(users));
        let res = service
            .update(UpdateUser::new(
                UserId::new(1),
                None,
                Some("user2@example.com".into()),
            ))
            .await;

        assert!(matches!(res, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn update_unknown_user_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        users.expect_update().never();

        let service = UserService::new(Arc::new(users));
        let res = service
            .update(UpdateUser::new(UserId::new(99), Some("x".into()), None))
            .await;

        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn delete_checks_existence_first() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        users.expect_delete().never();

        let service = UserService::new(Arc::new(users));
        let res = service.delete(DeleteUser::new(UserId::new(5))).await;

        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }
}
