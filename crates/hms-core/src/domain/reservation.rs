//! Reservation domain entity and status machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reservation lifecycle status.
///
/// The machine is deliberately permissive: any status may move to any
/// other; the only rule is membership in this enumeration (exact,
/// case-sensitive match on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "confirmed")]
    Confirmed,
    #[serde(rename = "checked-in")]
    CheckedIn,
    #[serde(rename = "checked-out")]
    CheckedOut,
    #[serde(rename = "cancelled")]
    Cancelled,
    #[serde(rename = "no-show")]
    NoShow,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::CheckedIn => "checked-in",
            ReservationStatus::CheckedOut => "checked-out",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::NoShow => "no-show",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ReservationStatus::Pending),
            "confirmed" => Some(ReservationStatus::Confirmed),
            "checked-in" => Some(ReservationStatus::CheckedIn),
            "checked-out" => Some(ReservationStatus::CheckedOut),
            "cancelled" => Some(ReservationStatus::Cancelled),
            "no-show" => Some(ReservationStatus::NoShow),
            _ => None,
        }
    }

    /// Whether a reservation in this status keeps its room slot blocked.
    /// Cancelled and no-show reservations free the slot.
    pub fn blocks_booking(&self) -> bool {
        !matches!(self, ReservationStatus::Cancelled | ReservationStatus::NoShow)
    }

    /// Whether a reservation in this status counts towards revenue.
    pub fn earns_revenue(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Confirmed
                | ReservationStatus::CheckedIn
                | ReservationStatus::CheckedOut
        )
    }
}

impl Default for ReservationStatus {
    fn default() -> Self {
        ReservationStatus::Pending
    }
}

/// A booking of one room by one user over the half-open interval
/// `[start_date, end_date)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl Reservation {
    pub fn new(
        user_id: Uuid,
        room_id: Uuid,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        status: ReservationStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            room_id,
            start_date,
            end_date,
            status,
            created_at: now,
            updated_at: now,
            removed_at: None,
        }
    }

    /// Half-open interval overlap: `self.start < end && self.end > start`.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_date < end && self.end_date > start
    }

    pub fn set_status(&mut self, status: ReservationStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn is_deleted(&self) -> bool {
        self.removed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn reservation(start: DateTime<Utc>, end: DateTime<Utc>) -> Reservation {
        Reservation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            start,
            end,
            ReservationStatus::Confirmed,
        )
    }

    #[test]
    fn test_status_parse_is_exact() {
        assert_eq!(
            ReservationStatus::from_str("checked-in"),
            Some(ReservationStatus::CheckedIn)
        );
        assert_eq!(ReservationStatus::from_str("Checked-In"), None);
        assert_eq!(ReservationStatus::from_str("CONFIRMED"), None);
        assert_eq!(ReservationStatus::from_str("unknown"), None);
        assert_eq!(ReservationStatus::from_str(""), None);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::CheckedIn,
            ReservationStatus::CheckedOut,
            ReservationStatus::Cancelled,
            ReservationStatus::NoShow,
        ] {
            assert_eq!(ReservationStatus::from_str(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_terminal_statuses_do_not_block() {
        assert!(ReservationStatus::Confirmed.blocks_booking());
        assert!(ReservationStatus::Pending.blocks_booking());
        assert!(ReservationStatus::CheckedIn.blocks_booking());
        assert!(ReservationStatus::CheckedOut.blocks_booking());
        assert!(!ReservationStatus::Cancelled.blocks_booking());
        assert!(!ReservationStatus::NoShow.blocks_booking());
    }

    #[test]
    fn test_revenue_statuses() {
        assert!(ReservationStatus::Confirmed.earns_revenue());
        assert!(ReservationStatus::CheckedIn.earns_revenue());
        assert!(ReservationStatus::CheckedOut.earns_revenue());
        assert!(!ReservationStatus::Pending.earns_revenue());
        assert!(!ReservationStatus::Cancelled.earns_revenue());
        assert!(!ReservationStatus::NoShow.earns_revenue());
    }

    #[test]
    fn test_overlap_is_half_open() {
        let r = reservation(date(2024, 1, 5), date(2024, 1, 7));

        // Plain overlap
        assert!(r.overlaps(date(2024, 1, 6), date(2024, 1, 8)));
        // Contained
        assert!(r.overlaps(date(2024, 1, 5), date(2024, 1, 6)));
        // Back-to-back does not overlap
        assert!(!r.overlaps(date(2024, 1, 7), date(2024, 1, 9)));
        assert!(!r.overlaps(date(2024, 1, 3), date(2024, 1, 5)));
        // Disjoint
        assert!(!r.overlaps(date(2024, 2, 1), date(2024, 2, 3)));
    }

    #[test]
    fn test_set_status_refreshes_updated_at() {
        let mut r = reservation(date(2024, 1, 5), date(2024, 1, 7));
        let before = r.updated_at;
        r.set_status(ReservationStatus::CheckedIn);
        assert_eq!(r.status, ReservationStatus::CheckedIn);
        assert!(r.updated_at >= before);
    }
}
