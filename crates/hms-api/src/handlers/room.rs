//! Room management handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use hms_core::domain::Room;
use hms_core::services::UpdateRoomCommand;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub number: String,
    pub room_type: String,
    pub status: String,
    pub price: f64,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateRoomRequest {
    pub number: Option<String>,
    pub room_type: Option<String>,
    pub status: Option<String>,
    pub price: Option<f64>,
}

impl From<UpdateRoomRequest> for UpdateRoomCommand {
    fn from(req: UpdateRoomRequest) -> Self {
        Self {
            number: req.number,
            room_type: req.room_type,
            status: req.status,
            price: req.price,
        }
    }
}

pub async fn create_room(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Room>>), ApiError> {
    let room = state
        .room_service
        .create(
            &payload.number,
            &payload.room_type,
            &payload.status,
            payload.price,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(room))))
}

pub async fn list_rooms(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Room>>>, ApiError> {
    let rooms = state.room_service.list().await?;
    Ok(Json(ApiResponse::success(rooms)))
}

pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Room>>, ApiError> {
    let room = state.room_service.get(&room_id).await?;
    Ok(Json(ApiResponse::success(room)))
}

pub async fn update_room(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<UpdateRoomRequest>,
) -> Result<Json<ApiResponse<Room>>, ApiError> {
    let room = state
        .room_service
        .update(&room_id, payload.into())
        .await?;
    Ok(Json(ApiResponse::success(room)))
}

pub async fn delete_room(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.room_service.delete(&room_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
