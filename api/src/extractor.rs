use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use kernel::model::id::UserId;
use shared::error::AppError;

pub const SHARER_USER_HEADER: &str = "X-Sharer-User-Id";

/// `X-Sharer-User-Id` ヘッダーで名乗った利用者。
///
/// ヘッダーの値は検証せずにそのまま信頼する。
/// 利用者が実在するかどうかはサービス側で確認する。
#[derive(Debug, Clone, Copy)]
pub struct SharerUser(pub UserId);

impl SharerUser {
    pub fn id(&self) -> UserId {
        self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SharerUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SHARER_USER_HEADER)
            .ok_or_else(|| {
                AppError::InvalidSharerHeader(format!("Missing {SHARER_USER_HEADER} header"))
            })?
            .to_str()
            .map_err(|_| {
                AppError::InvalidSharerHeader(format!("{SHARER_USER_HEADER} must be ASCII"))
            })?;

        value.parse::<UserId>().map(Self).map_err(|_| {
            AppError::InvalidSharerHeader(format!(
                "{SHARER_USER_HEADER} must be a numeric user id, got `{value}`"
            ))
        })
    }
}
