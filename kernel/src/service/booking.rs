use std::sync::Arc;

use chrono::Utc;
use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::{
    model::{
        booking::{
            event::{ApproveBooking, CreateBooking},
            Booking, BookingListOptions, BookingParty, BookingState, BookingStatus,
        },
        id::{BookingId, UserId},
        list::Pagination,
    },
    repository::{booking::BookingRepository, item::ItemRepository, user::UserRepository},
};

use super::find_user;

/// 予約の作成・承認と一覧取得。
///
/// 他人の予約やアイテムへのアクセスは権限エラーではなく
/// `EntityNotFound` として返し、対象の存在自体を明かさない。
#[derive(new)]
pub struct BookingService {
    booking_repository: Arc<dyn BookingRepository>,
    item_repository: Arc<dyn ItemRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl BookingService {
    pub async fn create(&self, event: CreateBooking) -> AppResult<Booking> {
        if event.end_at <= event.start_at {
            return Err(AppError::ValidationError(
                "Booking end must be after its start".into(),
            ));
        }
        if event.start_at < Utc::now() {
            return Err(AppError::ValidationError(
                "Booking start must not be in the past".into(),
            ));
        }

        let item = self
            .item_repository
            .find_by_id(event.item_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("Item {} not found", event.item_id)))?;
        find_user(self.user_repository.as_ref(), event.booked_by).await?;

        if !item.available {
            return Err(AppError::ValidationError(format!(
                "Item {} is not available for booking",
                item.item_id
            )));
        }
        // 自分のアイテムは予約できない
        if item.is_owned_by(event.booked_by) {
            return Err(AppError::EntityNotFound(format!(
                "Item {} not found",
                item.item_id
            )));
        }

        let booking = self.booking_repository.create(event).await?;
        tracing::info!(
            booking_id = %booking.booking_id,
            item_id = %booking.item.item_id,
            booker_id = %booking.booker.user_id,
            "booking created"
        );
        Ok(booking)
    }

    pub async fn find_by_id(&self, booking_id: BookingId, requested_user: UserId) -> AppResult<Booking> {
        match self.booking_repository.find_by_id(booking_id).await? {
            Some(booking) if booking.is_visible_to(requested_user) => Ok(booking),
            _ => Err(AppError::EntityNotFound(format!(
                "Booking {booking_id} not found"
            ))),
        }
    }

    pub async fn approve(&self, event: ApproveBooking) -> AppResult<Booking> {
        let ApproveBooking {
            booking_id,
            requested_user,
            approved,
        } = event;

        let booking = self
            .booking_repository
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("Booking {booking_id} not found")))?;

        if booking.item.owner_id != requested_user {
            return Err(AppError::EntityNotFound(format!(
                "Booking {booking_id} not found"
            )));
        }
        if booking.status.is_decided() {
            return Err(already_decided(booking_id, booking.status));
        }

        let to = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };

        // 読み取り後に別リクエストが決定していた場合は書き換えない
        let updated = self
            .booking_repository
            .update_status(booking_id, BookingStatus::Waiting, to)
            .await?
            .ok_or_else(|| already_decided(booking_id, to))?;

        tracing::info!(
            booking_id = %booking_id,
            status = updated.status.as_ref(),
            "booking decided"
        );
        Ok(updated)
    }

    pub async fn find_for_booker(
        &self,
        booker_id: UserId,
        state: BookingState,
        pagination: Pagination,
    ) -> AppResult<Vec<Booking>> {
        self.find_all(BookingParty::Booker(booker_id), state, pagination)
            .await
    }

    pub async fn find_for_owner(
        &self,
        owner_id: UserId,
        state: BookingState,
        pagination: Pagination,
    ) -> AppResult<Vec<Booking>> {
        self.find_all(BookingParty::Owner(owner_id), state, pagination)
            .await
    }

    async fn find_all(
        &self,
        party: BookingParty,
        state: BookingState,
        pagination: Pagination,
    ) -> AppResult<Vec<Booking>> {
        let user_id = match party {
            BookingParty::Booker(id) | BookingParty::Owner(id) => id,
        };
        find_user(self.user_repository.as_ref(), user_id).await?;

        self.booking_repository
            .find_all(BookingListOptions {
                party,
                state,
                now: Utc::now(),
                pagination,
            })
            .await
    }
}

fn already_decided(booking_id: BookingId, status: BookingStatus) -> AppError {
    AppError::ValidationError(format!(
        "Booking {booking_id} has already been {}",
        status.as_ref().to_lowercase()
    ))
}
