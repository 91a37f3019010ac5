//! Room domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Single,
    Double,
    Suite,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "single",
            RoomType::Double => "double",
            RoomType::Suite => "suite",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "single" => Some(RoomType::Single),
            "double" => Some(RoomType::Double),
            "suite" => Some(RoomType::Suite),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Occupied,
    Cleaning,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Cleaning => "cleaning",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "available" => Some(RoomStatus::Available),
            "occupied" => Some(RoomStatus::Occupied),
            "cleaning" => Some(RoomStatus::Cleaning),
            _ => None,
        }
    }
}

impl Default for RoomStatus {
    fn default() -> Self {
        RoomStatus::Available
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Room {
    pub id: Uuid,

    #[validate(length(min = 1, max = 16))]
    pub number: String,

    pub room_type: RoomType,
    pub status: RoomStatus,

    #[validate(range(min = 0.0))]
    pub price: f64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl Room {
    pub fn new(
        number: String,
        room_type: RoomType,
        status: RoomStatus,
        price: f64,
    ) -> Result<Self, validator::ValidationErrors> {
        let now = Utc::now();
        let room = Self {
            id: Uuid::new_v4(),
            number,
            room_type,
            status,
            price,
            created_at: now,
            updated_at: now,
            removed_at: None,
        };

        room.validate()?;
        Ok(room)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn is_deleted(&self) -> bool {
        self.removed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_room_rejects_negative_price() {
        let room = Room::new("101".into(), RoomType::Single, RoomStatus::Available, -1.0);
        assert!(room.is_err());
    }

    #[test]
    fn test_new_room_rejects_empty_number() {
        let room = Room::new("".into(), RoomType::Single, RoomStatus::Available, 100.0);
        assert!(room.is_err());
    }

    #[test]
    fn test_type_and_status_parsing() {
        assert_eq!(RoomType::from_str("suite"), Some(RoomType::Suite));
        assert_eq!(RoomType::from_str("penthouse"), None);
        assert_eq!(RoomStatus::from_str("cleaning"), Some(RoomStatus::Cleaning));
        assert_eq!(RoomStatus::from_str("dirty"), None);
    }
}
