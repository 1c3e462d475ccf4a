use garde::Validate;
use kernel::model::{
    id::UserId,
    user::{
        event::{CreateUser, UpdateUser},
        User,
    },
};
use serde::{Deserialize, Serialize};

use super::{not_blank, not_blank_if_present};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[garde(custom(not_blank))]
    #[serde(default)]
    pub name: String,
    #[garde(email)]
    #[serde(default)]
    pub email: String,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(value: CreateUserRequest) -> Self {
        let CreateUserRequest { name, email } = value;
        CreateUser {
            user_name: name,
            email,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[garde(custom(not_blank_if_present))]
    pub name: Option<String>,
    #[garde(email)]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    pub fn into_event(self, user_id: UserId) -> UpdateUser {
        UpdateUser::new(user_id, self.name, self.email)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            user_id,
            user_name,
            email,
        } = value;
        Self {
            id: user_id,
            name: user_name,
            email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_email_is_rejected() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"name": "alice", "email": "not-an-email"}"#).unwrap();
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn missing_name_is_rejected() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"email": "alice@example.com"}"#).unwrap();
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn partial_update_keeps_absent_fields_empty() {
        let req: UpdateUserRequest = serde_json::from_str(r#"{"name": "bob"}"#).unwrap();
        assert!(req.validate(&()).is_ok());

        let event = req.into_event(UserId::new(3));
        assert_eq!(event.user_id, UserId::new(3));
        assert_eq!(event.user_name.as_deref(), Some("bob"));
        assert!(event.email.is_none());
    }

    #[test]
    fn user_is_rendered_with_short_field_names() {
        let json = serde_json::to_value(UserResponse::from(User {
            user_id: UserId::new(1),
            user_name: "alice".into(),
            email: "alice@example.com".into(),
        }))
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "alice", "email": "alice@example.com"})
        );
    }
}
