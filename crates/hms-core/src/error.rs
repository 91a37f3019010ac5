//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found")]
    UserNotFound,

    #[error("Room not found")]
    RoomNotFound,

    #[error("Reservation not found")]
    ReservationNotFound,

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Room number already exists: {0}")]
    RoomNumberAlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid room type: {0}")]
    InvalidRoomType(String),

    #[error("Invalid room status: {0}")]
    InvalidRoomStatus(String),

    #[error("Invalid reservation status: {0}")]
    InvalidReservationStatus(String),

    #[error("Start date must be before end date")]
    InvalidDateRange,

    #[error("Reservation dates conflict with an existing reservation")]
    ReservationConflict,

    #[error("User has reservations and cannot be deleted")]
    UserHasReservations,

    #[error("Password too short")]
    PasswordTooShort,

    #[error("Password too long")]
    PasswordTooLong,

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Email error: {0}")]
    EmailError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
