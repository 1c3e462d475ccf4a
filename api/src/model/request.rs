use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::ItemRequestId,
    request::{ItemRequest, ItemRequestWithItems},
};
use serde::{Deserialize, Serialize};

use super::{item::ItemResponse, not_blank};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequestRequest {
    #[garde(custom(not_blank))]
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequestResponse {
    pub id: ItemRequestId,
    pub description: String,
    pub created: DateTime<Utc>,
    pub items: Vec<ItemResponse>,
}

impl From<ItemRequestWithItems> for ItemRequestResponse {
    fn from(value: ItemRequestWithItems) -> Self {
        let ItemRequestWithItems { request, items } = value;
        Self {
            id: request.request_id,
            description: request.description,
            created: request.created_at,
            items: items.into_iter().map(ItemResponse::from).collect(),
        }
    }
}

// 作成直後のリクエストにはまだアイテムが紐づいていない
impl From<ItemRequest> for ItemRequestResponse {
    fn from(request: ItemRequest) -> Self {
        ItemRequestWithItems {
            request,
            items: Vec::new(),
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_description_is_rejected() {
        let req: CreateItemRequestRequest = serde_json::from_str(r#"{"description": ""}"#).unwrap();
        assert!(req.validate(&()).is_err());

        let req: CreateItemRequestRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn fresh_request_has_no_items() {
        let created = "2030-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let json = serde_json::to_value(ItemRequestResponse::from(ItemRequest {
            request_id: ItemRequestId::new(4),
            description: "need a ladder".into(),
            requester_id: kernel::model::id::UserId::new(1),
            created_at: created,
        }))
        .unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 4,
                "description": "need a ladder",
                "created": "2030-01-01T00:00:00Z",
                "items": [],
            })
        );
    }
}
