//! Reservation repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::Reservation;
use crate::error::DomainError;

/// Read model for revenue reports: a reservation joined with the price
/// of its room.
#[derive(Debug, Clone)]
pub struct ReservationWithPrice {
    pub reservation: Reservation,
    pub room_price: f64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Reservation>, DomainError>;
    async fn find_all(&self) -> Result<Vec<Reservation>, DomainError>;

    /// Inserts the reservation, failing with
    /// [`DomainError::ReservationConflict`] when a blocking reservation
    /// overlaps its `[start, end)` interval on the same room. The check
    /// and the insert run in a single serializable transaction.
    async fn create(&self, reservation: &Reservation) -> Result<Reservation, DomainError>;

    async fn update(&self, reservation: &Reservation) -> Result<Reservation, DomainError>;

    /// Like [`update`](Self::update), but re-runs the overlap check
    /// (ignoring the reservation itself) and the write in one
    /// serializable transaction, failing with
    /// [`DomainError::ReservationConflict`] when a blocking reservation
    /// overlaps the new `[start, end)` interval. Used when dates move.
    async fn update_checked(&self, reservation: &Reservation) -> Result<Reservation, DomainError>;

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;

    /// Blocking reservations on `room_id` overlapping `[start, end)`,
    /// optionally ignoring one reservation id (for updates).
    async fn find_overlapping(
        &self,
        room_id: &Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> Result<Vec<Reservation>, DomainError>;

    /// Every reservation, any room and any status, overlapping
    /// `[start, end)`. Feeds the occupancy report.
    async fn find_overlapping_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Reservation>, DomainError>;

    /// Reservations wholly contained in `[start, end]` (closed
    /// containment, matching the revenue report convention), joined
    /// with their room price. No status filter; the report layer
    /// applies it.
    async fn find_contained_with_price(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ReservationWithPrice>, DomainError>;
}
