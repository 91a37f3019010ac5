//! Room management service

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{Room, RoomStatus, RoomType};
use crate::error::DomainError;
use crate::repositories::RoomRepository;

/// Partial update; `None` means "leave unchanged".
#[derive(Debug, Clone, Default)]
pub struct UpdateRoomCommand {
    pub number: Option<String>,
    pub room_type: Option<String>,
    pub status: Option<String>,
    pub price: Option<f64>,
}

pub struct RoomService<R: RoomRepository> {
    room_repo: Arc<R>,
}

impl<R: RoomRepository> RoomService<R> {
    pub fn new(room_repo: Arc<R>) -> Self {
        Self { room_repo }
    }

    pub async fn create(
        &self,
        number: &str,
        room_type: &str,
        status: &str,
        price: f64,
    ) -> Result<Room, DomainError> {
        let room_type = RoomType::from_str(room_type)
            .ok_or_else(|| DomainError::InvalidRoomType(room_type.to_string()))?;
        let status = RoomStatus::from_str(status)
            .ok_or_else(|| DomainError::InvalidRoomStatus(status.to_string()))?;

        if self.room_repo.find_by_number(number).await?.is_some() {
            return Err(DomainError::RoomNumberAlreadyExists(number.to_string()));
        }

        let room = Room::new(number.to_string(), room_type, status, price)
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let created = self.room_repo.create(&room).await?;
        info!("Room {} created", created.number);
        Ok(created)
    }

    pub async fn get(&self, id: &Uuid) -> Result<Room, DomainError> {
        self.room_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::RoomNotFound)
    }

    pub async fn list(&self) -> Result<Vec<Room>, DomainError> {
        self.room_repo.find_all().await
    }

    pub async fn update(&self, id: &Uuid, cmd: UpdateRoomCommand) -> Result<Room, DomainError> {
        let mut room = self
            .room_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::RoomNotFound)?;

        if let Some(number) = cmd.number {
            if number != room.number
                && self.room_repo.find_by_number(&number).await?.is_some()
            {
                return Err(DomainError::RoomNumberAlreadyExists(number));
            }
            room.number = number;
        }
        if let Some(room_type) = cmd.room_type {
            room.room_type = RoomType::from_str(&room_type)
                .ok_or(DomainError::InvalidRoomType(room_type))?;
        }
        if let Some(status) = cmd.status {
            room.status = RoomStatus::from_str(&status)
                .ok_or(DomainError::InvalidRoomStatus(status))?;
        }
        if let Some(price) = cmd.price {
            if price < 0.0 {
                return Err(DomainError::ValidationError("price must be >= 0".into()));
            }
            room.price = price;
        }

        room.touch();
        self.room_repo.update(&room).await
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.room_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::RoomNotFound)?;
        self.room_repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::room_repository::MockRoomRepository;

    fn service(repo: MockRoomRepository) -> RoomService<MockRoomRepository> {
        RoomService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_type() {
        let err = service(MockRoomRepository::new())
            .create("101", "penthouse", "available", 100.0)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidRoomType(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_number() {
        let mut repo = MockRoomRepository::new();
        repo.expect_find_by_number().returning(|n| {
            Ok(Some(
                Room::new(n.to_string(), RoomType::Single, RoomStatus::Available, 90.0).unwrap(),
            ))
        });

        let err = service(repo)
            .create("101", "single", "available", 100.0)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RoomNumberAlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_update_rejects_negative_price() {
        let mut repo = MockRoomRepository::new();
        repo.expect_find_by_id().returning(|id| {
            let mut room =
                Room::new("101".into(), RoomType::Single, RoomStatus::Available, 90.0).unwrap();
            room.id = *id;
            Ok(Some(room))
        });

        let err = service(repo)
            .update(
                &Uuid::new_v4(),
                UpdateRoomCommand {
                    price: Some(-5.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_update_missing_room() {
        let mut repo = MockRoomRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let err = service(repo)
            .update(&Uuid::new_v4(), UpdateRoomCommand::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RoomNotFound));
    }
}
