//! # HMS Core
//!
//! Domain entities, services, and repository traits for the hotel
//! management system.

pub mod domain;
pub mod error;
pub mod mailer;
pub mod repositories;
pub mod services;

pub use domain::*;
pub use error::DomainError;
pub use mailer::Mailer;
