use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    booking::{event::CreateBooking, Booking, BookingStatus},
    id::{BookingId, ItemId, UserId},
    list::Pagination,
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

use super::{default_from, default_size};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[garde(required)]
    #[serde(default, deserialize_with = "booking_time::deserialize")]
    pub start: Option<DateTime<Utc>>,
    #[garde(required)]
    #[serde(default, deserialize_with = "booking_time::deserialize")]
    pub end: Option<DateTime<Utc>>,
    #[garde(required)]
    pub item_id: Option<ItemId>,
}

impl CreateBookingRequest {
    pub fn into_event(self, booked_by: UserId) -> AppResult<CreateBooking> {
        match (self.item_id, self.start, self.end) {
            (Some(item_id), Some(start), Some(end)) => {
                Ok(CreateBooking::new(item_id, booked_by, start, end))
            }
            _ => Err(AppError::ValidationError(
                "start, end and itemId are required".into(),
            )),
        }
    }
}

// タイムゾーンなしの日時 (2030-01-01T10:00 など) は UTC として読む
mod booking_time {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de::Error, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if let Ok(at) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(Some(at.with_timezone(&Utc)));
        }
        raw.parse::<NaiveDateTime>()
            .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M"))
            .map(|naive| Some(naive.and_utc()))
            .map_err(|_| D::Error::custom(format!("invalid date-time `{raw}`")))
    }
}

fn default_state() -> String {
    "ALL".into()
}

// state は文字列のまま受け取り、ハンドラ側で解釈する
#[derive(Debug, Deserialize, Validate)]
pub struct BookingListQuery {
    #[garde(skip)]
    #[serde(default = "default_state")]
    pub state: String,
    #[garde(range(min = 0))]
    #[serde(default = "default_from")]
    pub from: i64,
    #[garde(range(min = 1))]
    #[serde(default = "default_size")]
    pub size: i64,
}

impl BookingListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.from, self.size)
    }
}

#[derive(Debug, Deserialize)]
pub struct ApproveQuery {
    pub approved: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatusName {
    Waiting,
    Approved,
    Rejected,
}

impl From<BookingStatus> for BookingStatusName {
    fn from(value: BookingStatus) -> Self {
        match value {
            BookingStatus::Waiting => Self::Waiting,
            BookingStatus::Approved => Self::Approved,
            BookingStatus::Rejected => Self::Rejected,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookerResponse {
    pub id: UserId,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedItemResponse {
    pub id: ItemId,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: BookingId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatusName,
    pub booker: BookerResponse,
    pub item: BookedItemResponse,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id,
            start_at,
            end_at,
            status,
            item,
            booker,
        } = value;
        Self {
            id: booking_id,
            start: start_at,
            end: end_at,
            status: status.into(),
            booker: BookerResponse {
                id: booker.user_id,
                name: booker.user_name,
            },
            item: BookedItemResponse {
                id: item.item_id,
                name: item.item_name,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::booking::{BookingItem, BookingUser};

    fn at(raw: &str) -> DateTime<Utc> {
        raw.parse::<DateTime<Utc>>().unwrap()
    }

    #[test]
    fn zone_less_times_are_read_as_utc() {
        let req: CreateBookingRequest = serde_json::from_str(
            r#"{"itemId": 1, "start": "2030-01-01T10:00:00", "end": "2030-01-02T10:42"}"#,
        )
        .unwrap();
        assert!(req.validate(&()).is_ok());

        let event = req.into_event(UserId::new(2)).unwrap();
        assert_eq!(event.item_id, ItemId::new(1));
        assert_eq!(event.booked_by, UserId::new(2));
        assert_eq!(event.start_at, at("2030-01-01T10:00:00Z"));
        assert_eq!(event.end_at, at("2030-01-02T10:42:00Z"));
    }

    #[test]
    fn offset_times_are_converted_to_utc() {
        let req: CreateBookingRequest = serde_json::from_str(
            r#"{"itemId": 1, "start": "2030-01-01T19:00:00+09:00", "end": "2030-01-02T10:00:00Z"}"#,
        )
        .unwrap();

        let event = req.into_event(UserId::new(2)).unwrap();
        assert_eq!(event.start_at, at("2030-01-01T10:00:00Z"));
    }

    #[test]
    fn garbage_time_fails_to_deserialize() {
        let res = serde_json::from_str::<CreateBookingRequest>(
            r#"{"itemId": 1, "start": "tomorrow", "end": "2030-01-02T10:00:00"}"#,
        );
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn missing_fields_reach_validation_instead_of_a_rejection() {
        use axum::{body::Body, extract::FromRequest, http::Request, Json};

        for body in [
            r#"{"itemId": 1, "end": "2030-01-02T10:00:00"}"#,
            r#"{"itemId": 1, "start": "2030-01-01T10:00:00"}"#,
            r#"{"start": "2030-01-01T10:00:00", "end": "2030-01-02T10:00:00"}"#,
        ] {
            let request = Request::builder()
                .method("POST")
                .uri("/bookings")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap();
            let Json(req) = Json::<CreateBookingRequest>::from_request(request, &())
                .await
                .unwrap();

            let err = AppError::from(req.validate(&()).unwrap_err());
            assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
            assert!(matches!(
                req.into_event(UserId::new(2)),
                Err(AppError::ValidationError(_))
            ));
        }
    }

    #[test]
    fn list_query_defaults_to_all_states() {
        let query: BookingListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.state, "ALL");
        assert_eq!(query.pagination(), Pagination::new(0, 20));
    }

    #[test]
    fn booking_is_rendered_with_nested_parties() {
        let start = "2030-01-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let end = "2030-01-02T10:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let json = serde_json::to_value(BookingResponse::from(Booking {
            booking_id: BookingId::new(5),
            start_at: start,
            end_at: end,
            status: BookingStatus::Waiting,
            item: BookingItem {
                item_id: ItemId::new(2),
                item_name: "Drill".into(),
                owner_id: UserId::new(1),
            },
            booker: BookingUser {
                user_id: UserId::new(3),
                user_name: "booker".into(),
            },
        }))
        .unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 5,
                "start": "2030-01-01T10:00:00Z",
                "end": "2030-01-02T10:00:00Z",
                "status": "WAITING",
                "booker": {"id": 3, "name": "booker"},
                "item": {"id": 2, "name": "Drill"},
            })
        );
    }
}
