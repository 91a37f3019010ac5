//! Repository traits (ports)

pub mod reservation_repository;
pub mod room_repository;
pub mod user_repository;

pub use reservation_repository::{ReservationRepository, ReservationWithPrice};
pub use room_repository::RoomRepository;
pub use user_repository::UserRepository;
