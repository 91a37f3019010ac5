//! Reservation booking and lifecycle handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use hms_core::domain::Reservation;
use hms_core::services::{CreateReservationCommand, UpdateReservationCommand};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub room_number: String,
    pub user_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateReservationRequest {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

pub async fn create_reservation(
    State(state): State<AppState>,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Reservation>>), ApiError> {
    let reservation = state
        .reservation_service
        .create(CreateReservationCommand {
            room_number: payload.room_number,
            user_id: payload.user_id,
            start_date: payload.start_date,
            end_date: payload.end_date,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(reservation)),
    ))
}

pub async fn list_reservations(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Reservation>>>, ApiError> {
    let reservations = state.reservation_service.list().await?;
    Ok(Json(ApiResponse::success(reservations)))
}

pub async fn get_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Reservation>>, ApiError> {
    let reservation = state.reservation_service.get(&reservation_id).await?;
    Ok(Json(ApiResponse::success(reservation)))
}

pub async fn update_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<Uuid>,
    Json(payload): Json<UpdateReservationRequest>,
) -> Result<Json<ApiResponse<Reservation>>, ApiError> {
    let reservation = state
        .reservation_service
        .update(
            &reservation_id,
            UpdateReservationCommand {
                start_date: payload.start_date,
                end_date: payload.end_date,
                status: payload.status,
                user_id: payload.user_id,
            },
        )
        .await?;
    Ok(Json(ApiResponse::success(reservation)))
}

pub async fn update_reservation_status(
    State(state): State<AppState>,
    Path(reservation_id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<Reservation>>, ApiError> {
    let reservation = state
        .reservation_service
        .set_status(&reservation_id, &payload.status)
        .await?;
    Ok(Json(ApiResponse::success(reservation)))
}

pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.reservation_service.delete(&reservation_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
