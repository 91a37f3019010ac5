//! Domain services (business logic)

pub mod auth_service;
pub mod report_service;
pub mod reservation_service;
pub mod room_service;
pub mod user_service;

pub use auth_service::{AuthService, LoginResult, UserInfo};
pub use report_service::{OccupancyReport, ReportService};
pub use reservation_service::{CreateReservationCommand, ReservationService, UpdateReservationCommand};
pub use room_service::{RoomService, UpdateRoomCommand};
pub use user_service::{UpdateUserCommand, UserService};
