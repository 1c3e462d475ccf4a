use chrono::{DateTime, Duration, Utc};

use crate::model::{
    booking::{Booking, BookingItem, BookingStatus, BookingUser},
    id::{BookingId, ItemId, UserId},
    item::{Item, ItemOwner},
    user::User,
};

pub fn user(id: i64) -> User {
    User {
        user_id: UserId::new(id),
        user_name: format!("user{id}"),
        email: format!("user{id}@example.com"),
    }
}

pub fn item(id: i64, owner_id: i64, available: bool) -> Item {
    Item {
        item_id: ItemId::new(id),
        item_name: format!("item{id}"),
        description: format!("description of item{id}"),
        available,
        owner: ItemOwner {
            owner_id: UserId::new(owner_id),
            owner_name: format!("user{owner_id}"),
        },
        request_id: None,
    }
}

pub fn booking(
    id: i64,
    item: &Item,
    booker_id: i64,
    status: BookingStatus,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
) -> Booking {
    Booking {
        booking_id: BookingId::new(id),
        start_at,
        end_at,
        status,
        item: BookingItem {
            item_id: item.item_id,
            item_name: item.item_name.clone(),
            owner_id: item.owner.owner_id,
        },
        booker: BookingUser {
            user_id: UserId::new(booker_id),
            user_name: format!("user{booker_id}"),
        },
    }
}

pub fn days_from_now(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}
