//! Reservation service: booking with conflict detection, partial
//! updates, and the status machine.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{Reservation, ReservationStatus};
use crate::error::DomainError;
use crate::mailer::Mailer;
use crate::repositories::{ReservationRepository, RoomRepository, UserRepository};

/// Booking request: the room is addressed by its public number, the
/// guest by id, dates as a half-open interval.
#[derive(Debug, Clone)]
pub struct CreateReservationCommand {
    pub room_number: String,
    pub user_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Partial update; `None` means "leave unchanged".
#[derive(Debug, Clone, Default)]
pub struct UpdateReservationCommand {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub user_id: Option<Uuid>,
}

pub struct ReservationService<RR, MR, UR>
where
    RR: ReservationRepository,
    MR: RoomRepository,
    UR: UserRepository,
{
    reservation_repo: Arc<RR>,
    room_repo: Arc<MR>,
    user_repo: Arc<UR>,
    mailer: Option<Arc<dyn Mailer>>,
}

impl<RR, MR, UR> ReservationService<RR, MR, UR>
where
    RR: ReservationRepository,
    MR: RoomRepository,
    UR: UserRepository,
{
    pub fn new(
        reservation_repo: Arc<RR>,
        room_repo: Arc<MR>,
        user_repo: Arc<UR>,
        mailer: Option<Arc<dyn Mailer>>,
    ) -> Self {
        Self {
            reservation_repo,
            room_repo,
            user_repo,
            mailer,
        }
    }

    /// Book a room. New reservations start out `confirmed`. The
    /// repository re-runs the overlap check inside its transaction, so
    /// two concurrent bookings for the same slot cannot both land.
    pub async fn create(
        &self,
        cmd: CreateReservationCommand,
    ) -> Result<Reservation, DomainError> {
        if cmd.start_date >= cmd.end_date {
            return Err(DomainError::InvalidDateRange);
        }

        let room = self
            .room_repo
            .find_by_number(&cmd.room_number)
            .await?
            .ok_or(DomainError::RoomNotFound)?;

        let user = self
            .user_repo
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        let reservation = Reservation::new(
            user.id,
            room.id,
            cmd.start_date,
            cmd.end_date,
            ReservationStatus::Confirmed,
        );

        let created = self.reservation_repo.create(&reservation).await?;

        info!(
            "Reservation {} created for room {} ({} - {})",
            created.id, room.number, created.start_date, created.end_date
        );

        if let Some(mailer) = &self.mailer {
            let mailer = Arc::clone(mailer);
            let to = user.email.clone();
            let body = format!(
                "Your reservation for room {} from {} to {} is confirmed.",
                room.number, created.start_date, created.end_date
            );
            // Fire-and-forget: delivery failures are logged, never
            // surfaced to the booking caller.
            tokio::spawn(async move {
                if let Err(e) = mailer.send(&to, "Reservation confirmed", &body).await {
                    warn!("Failed to send confirmation email: {}", e);
                }
            });
        }

        Ok(created)
    }

    /// Whether a blocking reservation overlaps `[start, end)` on the
    /// room, optionally ignoring one reservation id.
    pub async fn has_conflict(
        &self,
        room_id: &Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> Result<bool, DomainError> {
        let overlapping = self
            .reservation_repo
            .find_overlapping(room_id, start, end, exclude)
            .await?;
        Ok(!overlapping.is_empty())
    }

    pub async fn get(&self, id: &Uuid) -> Result<Reservation, DomainError> {
        self.reservation_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ReservationNotFound)
    }

    pub async fn list(&self) -> Result<Vec<Reservation>, DomainError> {
        self.reservation_repo.find_all().await
    }

    /// Partial update. A date change re-runs the conflict check and
    /// the write in one serializable transaction.
    pub async fn update(
        &self,
        id: &Uuid,
        cmd: UpdateReservationCommand,
    ) -> Result<Reservation, DomainError> {
        let mut reservation = self
            .reservation_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ReservationNotFound)?;

        if let Some(start) = cmd.start_date {
            reservation.start_date = start;
        }
        if let Some(end) = cmd.end_date {
            reservation.end_date = end;
        }
        if reservation.start_date >= reservation.end_date {
            return Err(DomainError::InvalidDateRange);
        }

        if let Some(status) = &cmd.status {
            let status = ReservationStatus::from_str(status)
                .ok_or_else(|| DomainError::InvalidReservationStatus(status.clone()))?;
            reservation.status = status;
        }
        if let Some(user_id) = cmd.user_id {
            self.user_repo
                .find_by_id(&user_id)
                .await?
                .ok_or(DomainError::UserNotFound)?;
            reservation.user_id = user_id;
        }

        reservation.updated_at = Utc::now();

        // Date moves share one serializable transaction with the
        // overlap re-check; a separate check-then-update would reopen
        // the booking race closed on create.
        if cmd.start_date.is_some() || cmd.end_date.is_some() {
            return self.reservation_repo.update_checked(&reservation).await;
        }

        self.reservation_repo.update(&reservation).await
    }

    /// Apply a status transition. The machine is permissive: any known
    /// status may follow any other; only unknown strings are rejected,
    /// and rejection leaves the reservation untouched.
    pub async fn set_status(
        &self,
        id: &Uuid,
        status: &str,
    ) -> Result<Reservation, DomainError> {
        let status = ReservationStatus::from_str(status)
            .ok_or_else(|| DomainError::InvalidReservationStatus(status.to_string()))?;

        let mut reservation = self
            .reservation_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ReservationNotFound)?;

        reservation.set_status(status);
        let updated = self.reservation_repo.update(&reservation).await?;

        info!("Reservation {} status set to {}", id, status.as_str());
        Ok(updated)
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.reservation_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ReservationNotFound)?;
        self.reservation_repo.delete(id).await
    }
}
