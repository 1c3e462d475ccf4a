use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::UserId,
        user::{
            event::{CreateUser, DeleteUser},
            User,
        },
    },
    repository::user::UserRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::user::UserRow, write_error, ConnectionPool};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                INSERT INTO users (user_name, email)
                VALUES ($1, $2)
                RETURNING user_id, user_name, email
            "#,
        )
        .bind(&event.user_name)
        .bind(&event.email)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(|e| write_error(e, || format!("Email {} is already in use", event.email)))?;

        Ok(User::from(row))
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, user_name, email
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, user_name, email
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(User::from))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, user_name, email
                FROM users
                ORDER BY user_id ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                UPDATE users
                SET user_name = $1, email = $2
                WHERE user_id = $3
                RETURNING user_id, user_name, email
            "#,
        )
        .bind(&user.user_name)
        .bind(&user.email)
        .bind(user.user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(|e| write_error(e, || format!("Email {} is already in use", user.email)))?;

        row.map(User::from)
            .ok_or_else(|| AppError::EntityNotFound(format!("User {} not found", user.user_id)))
    }

    async fn delete(&self, event: DeleteUser) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(event.user_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(|e| {
                write_error(e, || {
                    format!("User {} is still referenced by other records", event.user_id)
                })
            })?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "User {} not found",
                event.user_id
            )));
        }

        Ok(())
    }
}
