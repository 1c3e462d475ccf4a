use crate::model::id::UserId;
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateUser {
    pub user_name: String,
    pub email: String,
}

// None のフィールドは既存の値を維持する
#[derive(Debug, new)]
pub struct UpdateUser {
    pub user_id: UserId,
    pub user_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, new)]
pub struct DeleteUser {
    pub user_id: UserId,
}
