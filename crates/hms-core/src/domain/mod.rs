//! Domain entities for the hotel management system.

pub mod reservation;
pub mod room;
pub mod user;

pub use reservation::{Reservation, ReservationStatus};
pub use room::{Room, RoomStatus, RoomType};
pub use user::{User, UserRole};
