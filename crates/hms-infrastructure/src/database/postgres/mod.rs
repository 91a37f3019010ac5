//! PostgreSQL repository implementations

pub mod reservation_repo_impl;
pub mod room_repo_impl;
pub mod user_repo_impl;

pub use reservation_repo_impl::PgReservationRepository;
pub use room_repo_impl::PgRoomRepository;
pub use user_repo_impl::PgUserRepository;
