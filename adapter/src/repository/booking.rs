use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;
use kernel::{
    model::{
        booking::{
            event::CreateBooking, Booking, BookingListOptions, BookingParty, BookingState,
            BookingStatus, BookingSummary,
        },
        id::{BookingId, ItemId, UserId},
    },
    repository::booking::BookingRepository,
};
use shared::error::{AppError, AppResult};
use sqlx::{Postgres, QueryBuilder};

use crate::database::{
    model::booking::{BookingRow, BookingSummaryRow},
    write_error, ConnectionPool,
};

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

const SELECT_BOOKINGS: &str = r#"
    SELECT
        b.booking_id,
        b.start_at,
        b.end_at,
        b.status,
        b.item_id,
        i.item_name,
        i.owned_by,
        b.booked_by,
        u.user_name AS booker_name
    FROM bookings AS b
    INNER JOIN items AS i ON b.item_id = i.item_id
    INNER JOIN users AS u ON b.booked_by = u.user_id
"#;

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn create(&self, event: CreateBooking) -> AppResult<Booking> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
                WITH inserted AS (
                    INSERT INTO bookings (item_id, booked_by, start_at, end_at, status)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING booking_id, item_id, booked_by, start_at, end_at, status
                )
                SELECT
                    b.booking_id,
                    b.start_at,
                    b.end_at,
                    b.status,
                    b.item_id,
                    i.item_name,
                    i.owned_by,
                    b.booked_by,
                    u.user_name AS booker_name
                FROM inserted AS b
                INNER JOIN items AS i ON b.item_id = i.item_id
                INNER JOIN users AS u ON b.booked_by = u.user_id
            "#,
        )
        .bind(event.item_id)
        .bind(event.booked_by)
        .bind(event.start_at)
        .bind(event.end_at)
        .bind(BookingStatus::Waiting.as_ref())
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(|e| {
            write_error(e, || {
                format!(
                    "Item {} or user {} no longer exists",
                    event.item_id, event.booked_by
                )
            })
        })?;

        Booking::try_from(row)
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_BOOKINGS);
        query.push(" WHERE b.booking_id = ").push_bind(booking_id);

        let row = query
            .build_query_as::<BookingRow>()
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        row.map(Booking::try_from).transpose()
    }

    async fn update_status(
        &self,
        booking_id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
    ) -> AppResult<Option<Booking>> {
        // 現在のステータスが from の行だけを更新する。
        // 同時に判定された場合は後から来た方が 0 行になる
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
                WITH updated AS (
                    UPDATE bookings
                    SET status = $1
                    WHERE booking_id = $2 AND status = $3
                    RETURNING booking_id, item_id, booked_by, start_at, end_at, status
                )
                SELECT
                    b.booking_id,
                    b.start_at,
                    b.end_at,
                    b.status,
                    b.item_id,
                    i.item_name,
                    i.owned_by,
                    b.booked_by,
                    u.user_name AS booker_name
                FROM updated AS b
                INNER JOIN items AS i ON b.item_id = i.item_id
                INNER JOIN users AS u ON b.booked_by = u.user_id
            "#,
        )
        .bind(to.as_ref())
        .bind(booking_id)
        .bind(from.as_ref())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Booking::try_from).transpose()
    }

    async fn find_all(&self, options: BookingListOptions) -> AppResult<Vec<Booking>> {
        let BookingListOptions {
            party,
            state,
            now,
            pagination,
        } = options;

        let mut query = QueryBuilder::<Postgres>::new(SELECT_BOOKINGS);
        match party {
            BookingParty::Booker(user_id) => {
                query.push(" WHERE b.booked_by = ").push_bind(user_id);
            }
            BookingParty::Owner(user_id) => {
                query.push(" WHERE i.owned_by = ").push_bind(user_id);
            }
        }
        match state {
            BookingState::All => {}
            BookingState::Current => {
                query
                    .push(" AND b.start_at <= ")
                    .push_bind(now)
                    .push(" AND b.end_at >= ")
                    .push_bind(now);
            }
            BookingState::Past => {
                query.push(" AND b.end_at < ").push_bind(now);
            }
            BookingState::Future => {
                query.push(" AND b.start_at > ").push_bind(now);
            }
            BookingState::Waiting => {
                query
                    .push(" AND b.status = ")
                    .push_bind(BookingStatus::Waiting.as_ref());
            }
            BookingState::Rejected => {
                query
                    .push(" AND b.status = ")
                    .push_bind(BookingStatus::Rejected.as_ref());
            }
        }
        match state {
            BookingState::Past => query.push(" ORDER BY b.end_at DESC, b.booking_id DESC"),
            _ => query.push(" ORDER BY b.start_at DESC, b.booking_id DESC"),
        };
        query
            .push(" LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows = query
            .build_query_as::<BookingRow>()
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn find_last_for_item(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<BookingSummary>> {
        let row = sqlx::query_as::<_, BookingSummaryRow>(
            r#"
                SELECT booking_id, booked_by, start_at, end_at
                FROM bookings
                WHERE item_id = $1 AND end_at <= $2
                ORDER BY end_at DESC, booking_id DESC
                LIMIT 1
            "#,
        )
        .bind(item_id)
        .bind(now)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(BookingSummary::from))
    }

    async fn find_next_for_item(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<BookingSummary>> {
        let row = sqlx::query_as::<_, BookingSummaryRow>(
            r#"
                SELECT booking_id, booked_by, start_at, end_at
                FROM bookings
                WHERE item_id = $1 AND start_at > $2
                ORDER BY start_at ASC, booking_id ASC
                LIMIT 1
            "#,
        )
        .bind(item_id)
        .bind(now)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(BookingSummary::from))
    }

    async fn exists_completed(
        &self,
        booker_id: UserId,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
                SELECT EXISTS (
                    SELECT 1
                    FROM bookings
                    WHERE booked_by = $1
                      AND item_id = $2
                      AND status = $3
                      AND end_at <= $4
                )
            "#,
        )
        .bind(booker_id)
        .bind(item_id)
        .bind(BookingStatus::Approved.as_ref())
        .bind(now)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }
}
