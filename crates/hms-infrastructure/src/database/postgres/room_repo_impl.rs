//! PostgreSQL room repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};
use tracing::{error, info};
use uuid::Uuid;

use hms_core::domain::{Room, RoomStatus, RoomType};
use hms_core::error::DomainError;
use hms_core::repositories::RoomRepository;

pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct RoomRow {
    pub id: Uuid,
    pub number: String,
    pub room_type: String,
    pub status: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Room {
            id: row.id,
            number: row.number,
            room_type: RoomType::from_str(&row.room_type).unwrap_or(RoomType::Single),
            status: RoomStatus::from_str(&row.status).unwrap_or_default(),
            price: row.price,
            created_at: row.created_at,
            updated_at: row.updated_at,
            removed_at: row.removed_at,
        }
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Room>, DomainError> {
        let row: Option<RoomRow> = sqlx::query_as(
            r#"
            SELECT id, number, room_type, status, price, created_at, updated_at, removed_at
            FROM rooms
            WHERE id = $1 AND removed_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding room by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_number(&self, number: &str) -> Result<Option<Room>, DomainError> {
        let row: Option<RoomRow> = sqlx::query_as(
            r#"
            SELECT id, number, room_type, status, price, created_at, updated_at, removed_at
            FROM rooms
            WHERE number = $1 AND removed_at IS NULL
            "#,
        )
        .bind(number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding room by number: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_all(&self) -> Result<Vec<Room>, DomainError> {
        let rows: Vec<RoomRow> = sqlx::query_as(
            r#"
            SELECT id, number, room_type, status, price, created_at, updated_at, removed_at
            FROM rooms
            WHERE removed_at IS NULL
            ORDER BY number
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing rooms: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM rooms WHERE removed_at IS NULL")
            .fetch_one(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error counting rooms: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        row.try_get("count")
            .map_err(|e: sqlx::Error| DomainError::DatabaseError(e.to_string()))
    }

    async fn create(&self, room: &Room) -> Result<Room, DomainError> {
        info!("Creating room: {}", room.number);

        let row: RoomRow = sqlx::query_as(
            r#"
            INSERT INTO rooms (id, number, room_type, status, price, created_at, updated_at, removed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, number, room_type, status, price, created_at, updated_at, removed_at
            "#,
        )
        .bind(room.id)
        .bind(&room.number)
        .bind(room.room_type.as_str())
        .bind(room.status.as_str())
        .bind(room.price)
        .bind(room.created_at)
        .bind(room.updated_at)
        .bind(room.removed_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating room: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::RoomNumberAlreadyExists(room.number.clone())
            } else {
                DomainError::DatabaseError(msg)
            }
        })?;

        Ok(row.into())
    }

    async fn update(&self, room: &Room) -> Result<Room, DomainError> {
        let row: RoomRow = sqlx::query_as(
            r#"
            UPDATE rooms
            SET
                number = $2,
                room_type = $3,
                status = $4,
                price = $5,
                updated_at = $6
            WHERE id = $1 AND removed_at IS NULL
            RETURNING id, number, room_type, status, price, created_at, updated_at, removed_at
            "#,
        )
        .bind(room.id)
        .bind(&room.number)
        .bind(room.room_type.as_str())
        .bind(room.status.as_str())
        .bind(room.price)
        .bind(room.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating room: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::RoomNumberAlreadyExists(room.number.clone())
            } else {
                DomainError::DatabaseError(msg)
            }
        })?;

        Ok(row.into())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE rooms
            SET removed_at = NOW()
            WHERE id = $1 AND removed_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error deleting room: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }
}
