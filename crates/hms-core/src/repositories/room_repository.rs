//! Room repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Room;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Room>, DomainError>;
    async fn find_by_number(&self, number: &str) -> Result<Option<Room>, DomainError>;
    async fn find_all(&self) -> Result<Vec<Room>, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
    async fn create(&self, room: &Room) -> Result<Room, DomainError>;
    async fn update(&self, room: &Room) -> Result<Room, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
