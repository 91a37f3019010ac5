//! # HMS Infrastructure
//!
//! Database and mail implementations (adapters).

pub mod database;
pub mod email;

pub use database::{create_pool, PgReservationRepository, PgRoomRepository, PgUserRepository};
pub use email::SmtpMailer;
