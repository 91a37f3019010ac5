//! PostgreSQL reservation repository
//!
//! Booking inserts run the overlap check and the insert in one
//! SERIALIZABLE transaction, so concurrent bookings for the same slot
//! cannot both commit.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::{error, info};
use uuid::Uuid;

use hms_core::domain::{Reservation, ReservationStatus};
use hms_core::error::DomainError;
use hms_core::repositories::{ReservationRepository, ReservationWithPrice};

// Postgres SQLSTATE for serialization failures under SERIALIZABLE.
const SERIALIZATION_FAILURE: &str = "40001";

pub struct PgReservationRepository {
    pool: PgPool,
}

impl PgReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn set_transaction_serializable(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<(), DomainError> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Failed to set transaction isolation level: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;
        Ok(())
    }
}

fn map_db_error(e: sqlx::Error) -> DomainError {
    if let Some(code) = e.as_database_error().and_then(|d| d.code()) {
        if code == SERIALIZATION_FAILURE {
            // A concurrent booking won the slot.
            return DomainError::ReservationConflict;
        }
    }
    error!("Database error: {}", e);
    DomainError::DatabaseError(e.to_string())
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct ReservationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        Reservation {
            id: row.id,
            user_id: row.user_id,
            room_id: row.room_id,
            start_date: row.start_date,
            end_date: row.end_date,
            status: ReservationStatus::from_str(&row.status).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
            removed_at: row.removed_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ReservationWithPriceRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
    pub room_price: f64,
}

impl From<ReservationWithPriceRow> for ReservationWithPrice {
    fn from(row: ReservationWithPriceRow) -> Self {
        ReservationWithPrice {
            reservation: Reservation {
                id: row.id,
                user_id: row.user_id,
                room_id: row.room_id,
                start_date: row.start_date,
                end_date: row.end_date,
                status: ReservationStatus::from_str(&row.status).unwrap_or_default(),
                created_at: row.created_at,
                updated_at: row.updated_at,
                removed_at: row.removed_at,
            },
            room_price: row.room_price,
        }
    }
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Reservation>, DomainError> {
        let row: Option<ReservationRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, room_id, start_date, end_date, status,
                   created_at, updated_at, removed_at
            FROM reservations
            WHERE id = $1 AND removed_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_all(&self) -> Result<Vec<Reservation>, DomainError> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, room_id, start_date, end_date, status,
                   created_at, updated_at, removed_at
            FROM reservations
            WHERE removed_at IS NULL
            ORDER BY start_date
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, reservation: &Reservation) -> Result<Reservation, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        self.set_transaction_serializable(&mut tx).await?;

        // Overlap pre-check inside the transaction. Cancelled and
        // no-show reservations do not block the slot.
        let overlap: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT id
            FROM reservations
            WHERE room_id = $1
              AND removed_at IS NULL
              AND status NOT IN ('cancelled', 'no-show')
              AND start_date < $3
              AND end_date > $2
            LIMIT 1
            "#,
        )
        .bind(reservation.room_id)
        .bind(reservation.start_date)
        .bind(reservation.end_date)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if overlap.is_some() {
            return Err(DomainError::ReservationConflict);
        }

        let row: ReservationRow = sqlx::query_as(
            r#"
            INSERT INTO reservations
                (id, user_id, room_id, start_date, end_date, status,
                 created_at, updated_at, removed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, room_id, start_date, end_date, status,
                      created_at, updated_at, removed_at
            "#,
        )
        .bind(reservation.id)
        .bind(reservation.user_id)
        .bind(reservation.room_id)
        .bind(reservation.start_date)
        .bind(reservation.end_date)
        .bind(reservation.status.as_str())
        .bind(reservation.created_at)
        .bind(reservation.updated_at)
        .bind(reservation.removed_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        info!("Reservation created: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, reservation: &Reservation) -> Result<Reservation, DomainError> {
        let row: ReservationRow = sqlx::query_as(
            r#"
            UPDATE reservations
            SET
                user_id = $2,
                room_id = $3,
                start_date = $4,
                end_date = $5,
                status = $6,
                updated_at = $7
            WHERE id = $1 AND removed_at IS NULL
            RETURNING id, user_id, room_id, start_date, end_date, status,
                      created_at, updated_at, removed_at
            "#,
        )
        .bind(reservation.id)
        .bind(reservation.user_id)
        .bind(reservation.room_id)
        .bind(reservation.start_date)
        .bind(reservation.end_date)
        .bind(reservation.status.as_str())
        .bind(reservation.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn update_checked(&self, reservation: &Reservation) -> Result<Reservation, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        self.set_transaction_serializable(&mut tx).await?;

        // Overlap re-check inside the transaction, ignoring the
        // reservation being moved. Cancelled and no-show reservations
        // do not block the slot.
        let overlap: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT id
            FROM reservations
            WHERE room_id = $1
              AND removed_at IS NULL
              AND status NOT IN ('cancelled', 'no-show')
              AND start_date < $3
              AND end_date > $2
              AND id <> $4
            LIMIT 1
            "#,
        )
        .bind(reservation.room_id)
        .bind(reservation.start_date)
        .bind(reservation.end_date)
        .bind(reservation.id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if overlap.is_some() {
            return Err(DomainError::ReservationConflict);
        }

        let row: ReservationRow = sqlx::query_as(
            r#"
            UPDATE reservations
            SET
                user_id = $2,
                room_id = $3,
                start_date = $4,
                end_date = $5,
                status = $6,
                updated_at = $7
            WHERE id = $1 AND removed_at IS NULL
            RETURNING id, user_id, room_id, start_date, end_date, status,
                      created_at, updated_at, removed_at
            "#,
        )
        .bind(reservation.id)
        .bind(reservation.user_id)
        .bind(reservation.room_id)
        .bind(reservation.start_date)
        .bind(reservation.end_date)
        .bind(reservation.status.as_str())
        .bind(reservation.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE reservations
            SET removed_at = NOW()
            WHERE id = $1 AND removed_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    async fn find_overlapping(
        &self,
        room_id: &Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> Result<Vec<Reservation>, DomainError> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, room_id, start_date, end_date, status,
                   created_at, updated_at, removed_at
            FROM reservations
            WHERE room_id = $1
              AND removed_at IS NULL
              AND status NOT IN ('cancelled', 'no-show')
              AND start_date < $3
              AND end_date > $2
              AND ($4::uuid IS NULL OR id <> $4)
            "#,
        )
        .bind(room_id)
        .bind(start)
        .bind(end)
        .bind(exclude)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_overlapping_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Reservation>, DomainError> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, room_id, start_date, end_date, status,
                   created_at, updated_at, removed_at
            FROM reservations
            WHERE removed_at IS NULL
              AND start_date < $2
              AND end_date > $1
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_contained_with_price(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ReservationWithPrice>, DomainError> {
        let rows: Vec<ReservationWithPriceRow> = sqlx::query_as(
            r#"
            SELECT r.id, r.user_id, r.room_id, r.start_date, r.end_date, r.status,
                   r.created_at, r.updated_at, r.removed_at,
                   ro.price AS room_price
            FROM reservations r
            JOIN rooms ro ON ro.id = r.room_id
            WHERE r.removed_at IS NULL
              AND r.start_date >= $1
              AND r.end_date <= $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}
