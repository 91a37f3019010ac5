//! Occupancy and revenue reports

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::error::DomainError;
use crate::repositories::{ReservationRepository, ReservationWithPrice, RoomRepository};

#[derive(Debug, Clone, Serialize)]
pub struct OccupancyReport {
    pub total_rooms: i64,
    pub occupied_rooms: i64,
    pub available_rooms: i64,
}

/// Bucketing granularity shared by all revenue variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Granularity {
    Day,
    Month,
}

pub struct ReportService<RR, MR>
where
    RR: ReservationRepository,
    MR: RoomRepository,
{
    reservation_repo: Arc<RR>,
    room_repo: Arc<MR>,
}

impl<RR, MR> ReportService<RR, MR>
where
    RR: ReservationRepository,
    MR: RoomRepository,
{
    pub fn new(reservation_repo: Arc<RR>, room_repo: Arc<MR>) -> Self {
        Self {
            reservation_repo,
            room_repo,
        }
    }

    /// Room occupancy over `[start, end)`. Counts every reservation
    /// overlapping the range regardless of status; note this differs
    /// from the revenue filter below.
    pub async fn occupancy(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<OccupancyReport, DomainError> {
        let reservations = self
            .reservation_repo
            .find_overlapping_range(start, end)
            .await?;

        let occupied: HashSet<_> = reservations.iter().map(|r| r.room_id).collect();
        let total_rooms = self.room_repo.count().await?;
        let occupied_rooms = occupied.len() as i64;

        Ok(OccupancyReport {
            total_rooms,
            occupied_rooms,
            available_rooms: total_rooms - occupied_rooms,
        })
    }

    /// Total revenue over `[start, end]`: one room price per revenue
    /// reservation wholly contained in the range (not per night).
    pub async fn total_revenue(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<f64, DomainError> {
        let entries = self.revenue_entries(start, end).await?;
        Ok(entries.iter().map(|e| e.room_price).sum())
    }

    /// Revenue keyed by the reservation's start day (`YYYY-MM-DD`).
    pub async fn daily_revenue(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<BTreeMap<String, f64>, DomainError> {
        let entries = self.revenue_entries(start, end).await?;
        Ok(Self::bucket_revenue(&entries, Granularity::Day))
    }

    /// Revenue keyed by the reservation's start month (`YYYY-MM`).
    pub async fn monthly_revenue(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<BTreeMap<String, f64>, DomainError> {
        let entries = self.revenue_entries(start, end).await?;
        Ok(Self::bucket_revenue(&entries, Granularity::Month))
    }

    /// Reservations that count towards revenue: wholly contained in
    /// the range (closed containment) and in a revenue-earning status.
    async fn revenue_entries(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ReservationWithPrice>, DomainError> {
        let entries = self
            .reservation_repo
            .find_contained_with_price(start, end)
            .await?;
        Ok(entries
            .into_iter()
            .filter(|e| e.reservation.status.earns_revenue())
            .collect())
    }

    fn bucket_revenue(
        entries: &[ReservationWithPrice],
        granularity: Granularity,
    ) -> BTreeMap<String, f64> {
        let mut buckets = BTreeMap::new();
        for entry in entries {
            let start = entry.reservation.start_date;
            let key = match granularity {
                Granularity::Day => start.format("%Y-%m-%d").to_string(),
                Granularity::Month => format!("{:04}-{:02}", start.year(), start.month()),
            };
            *buckets.entry(key).or_insert(0.0) += entry.room_price;
        }
        buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Reservation, ReservationStatus};
    use crate::repositories::reservation_repository::MockReservationRepository;
    use crate::repositories::room_repository::MockRoomRepository;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn entry(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: ReservationStatus,
        price: f64,
    ) -> ReservationWithPrice {
        ReservationWithPrice {
            reservation: Reservation::new(Uuid::new_v4(), Uuid::new_v4(), start, end, status),
            room_price: price,
        }
    }

    fn service(
        rr: MockReservationRepository,
        mr: MockRoomRepository,
    ) -> ReportService<MockReservationRepository, MockRoomRepository> {
        ReportService::new(Arc::new(rr), Arc::new(mr))
    }

    #[tokio::test]
    async fn test_occupancy_counts_distinct_rooms() {
        let room_a = Uuid::new_v4();
        let room_b = Uuid::new_v4();
        let mut rr = MockReservationRepository::new();
        rr.expect_find_overlapping_range().returning(move |_, _| {
            let r1 = Reservation::new(
                Uuid::new_v4(),
                room_a,
                date(2024, 1, 1),
                date(2024, 1, 3),
                ReservationStatus::Confirmed,
            );
            let r2 = Reservation::new(
                Uuid::new_v4(),
                room_a,
                date(2024, 1, 4),
                date(2024, 1, 6),
                ReservationStatus::Cancelled,
            );
            let r3 = Reservation::new(
                Uuid::new_v4(),
                room_b,
                date(2024, 1, 2),
                date(2024, 1, 5),
                ReservationStatus::Pending,
            );
            Ok(vec![r1, r2, r3])
        });
        let mut mr = MockRoomRepository::new();
        mr.expect_count().returning(|| Ok(10));

        let report = service(rr, mr)
            .occupancy(date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();
        assert_eq!(report.total_rooms, 10);
        assert_eq!(report.occupied_rooms, 2);
        assert_eq!(report.available_rooms, 8);
    }

    #[tokio::test]
    async fn test_occupancy_available_is_total_minus_occupied() {
        let mut rr = MockReservationRepository::new();
        rr.expect_find_overlapping_range().returning(|_, _| Ok(vec![]));
        let mut mr = MockRoomRepository::new();
        mr.expect_count().returning(|| Ok(7));

        let report = service(rr, mr)
            .occupancy(date(2024, 6, 1), date(2024, 6, 30))
            .await
            .unwrap();
        assert_eq!(report.total_rooms, 7);
        assert_eq!(report.occupied_rooms, 0);
        assert_eq!(report.available_rooms, 7);
    }

    #[tokio::test]
    async fn test_revenue_excludes_non_earning_statuses() {
        let mut rr = MockReservationRepository::new();
        rr.expect_find_contained_with_price().returning(|_, _| {
            Ok(vec![
                entry(date(2024, 1, 1), date(2024, 1, 3), ReservationStatus::Confirmed, 100.0),
                entry(date(2024, 1, 4), date(2024, 1, 6), ReservationStatus::CheckedIn, 200.0),
                entry(date(2024, 1, 7), date(2024, 1, 9), ReservationStatus::CheckedOut, 50.0),
                entry(date(2024, 1, 10), date(2024, 1, 12), ReservationStatus::Pending, 999.0),
                entry(date(2024, 1, 13), date(2024, 1, 15), ReservationStatus::Cancelled, 999.0),
                entry(date(2024, 1, 16), date(2024, 1, 18), ReservationStatus::NoShow, 999.0),
            ])
        });

        let total = service(rr, MockRoomRepository::new())
            .total_revenue(date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();
        assert_eq!(total, 350.0);
    }

    #[tokio::test]
    async fn test_single_confirmed_reservation_priced_once() {
        // Two nights, one room price: revenue is per reservation.
        let mut rr = MockReservationRepository::new();
        rr.expect_find_contained_with_price().returning(|_, _| {
            Ok(vec![entry(
                date(2024, 1, 1),
                date(2024, 1, 3),
                ReservationStatus::Confirmed,
                100.0,
            )])
        });

        let total = service(rr, MockRoomRepository::new())
            .total_revenue(date(2024, 1, 1), date(2024, 1, 3))
            .await
            .unwrap();
        assert_eq!(total, 100.0);
    }

    #[tokio::test]
    async fn test_daily_revenue_buckets_by_start_day() {
        let mut rr = MockReservationRepository::new();
        rr.expect_find_contained_with_price().returning(|_, _| {
            Ok(vec![
                entry(date(2024, 1, 1), date(2024, 1, 3), ReservationStatus::Confirmed, 100.0),
                entry(date(2024, 1, 1), date(2024, 1, 2), ReservationStatus::CheckedOut, 80.0),
                entry(date(2024, 1, 5), date(2024, 1, 6), ReservationStatus::Confirmed, 60.0),
            ])
        });

        let daily = service(rr, MockRoomRepository::new())
            .daily_revenue(date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();
        assert_eq!(daily.get("2024-01-01"), Some(&180.0));
        assert_eq!(daily.get("2024-01-05"), Some(&60.0));
        assert_eq!(daily.len(), 2);
    }

    #[tokio::test]
    async fn test_monthly_revenue_buckets_by_start_month() {
        let mut rr = MockReservationRepository::new();
        rr.expect_find_contained_with_price().returning(|_, _| {
            Ok(vec![
                entry(date(2024, 1, 1), date(2024, 1, 3), ReservationStatus::Confirmed, 100.0),
                entry(date(2024, 1, 20), date(2024, 1, 22), ReservationStatus::Confirmed, 40.0),
                entry(date(2024, 2, 1), date(2024, 2, 3), ReservationStatus::CheckedIn, 75.0),
            ])
        });

        let monthly = service(rr, MockRoomRepository::new())
            .monthly_revenue(date(2024, 1, 1), date(2024, 3, 1))
            .await
            .unwrap();
        assert_eq!(monthly.get("2024-01"), Some(&140.0));
        assert_eq!(monthly.get("2024-02"), Some(&75.0));
    }
}
