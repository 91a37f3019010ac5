//! Mapping from domain errors to HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use hms_core::error::DomainError;

use crate::response::ApiResponse;

/// Wrapper so handlers can bubble domain errors with `?`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            DomainError::UserNotFound
            | DomainError::RoomNotFound
            | DomainError::ReservationNotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),

            DomainError::UsernameAlreadyExists(_)
            | DomainError::EmailAlreadyExists(_)
            | DomainError::RoomNumberAlreadyExists(_) => (StatusCode::CONFLICT, "ALREADY_EXISTS"),

            DomainError::ReservationConflict => (StatusCode::CONFLICT, "RESERVATION_CONFLICT"),

            DomainError::UserHasReservations => (StatusCode::CONFLICT, "USER_HAS_RESERVATIONS"),

            DomainError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),

            DomainError::InvalidRole(_)
            | DomainError::InvalidRoomType(_)
            | DomainError::InvalidRoomStatus(_)
            | DomainError::InvalidReservationStatus(_)
            | DomainError::InvalidDateRange
            | DomainError::PasswordTooShort
            | DomainError::PasswordTooLong
            | DomainError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),

            DomainError::PasswordHashError(_)
            | DomainError::TokenGenerationError(_)
            | DomainError::EmailError(_)
            | DomainError::DatabaseError(_)
            | DomainError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Internal failures keep their detail in the logs only.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Internal error: {}", self.0);
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(ApiResponse::<()>::error(code, &message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let (status, _) = ApiError(DomainError::RoomNotFound).status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let (status, code) = ApiError(DomainError::ReservationConflict).status_and_code();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(code, "RESERVATION_CONFLICT");
    }

    #[test]
    fn test_referenced_user_delete_maps_to_409() {
        let (status, code) = ApiError(DomainError::UserHasReservations).status_and_code();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(code, "USER_HAS_RESERVATIONS");
    }

    #[test]
    fn test_bad_input_maps_to_400() {
        let (status, _) =
            ApiError(DomainError::InvalidReservationStatus("gone".into())).status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_error_hides_detail() {
        let err = ApiError(DomainError::DatabaseError("connection refused".into()));
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "INTERNAL_ERROR");
    }
}
