//! Registration and login

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use hms_core::domain::UserRole;
use hms_core::error::DomainError;
use hms_core::services::UserInfo;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[validate(email)]
    pub email: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

impl From<UserInfo> for UserResponse {
    fn from(info: UserInfo) -> Self {
        Self {
            id: info.id,
            username: info.username,
            email: info.email,
            role: info.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    payload
        .validate()
        .map_err(|e| DomainError::ValidationError(e.to_string()))?;

    let info = state
        .auth_service
        .register(
            &payload.username,
            &payload.password,
            &payload.email,
            &payload.role,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserResponse::from(info))),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let result = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(LoginResponse {
        token: result.token,
        user: UserResponse::from(result.user),
    })))
}
