//! # HMS Shared
//!
//! Shared configuration, constants, and telemetry for the hotel
//! management system.

pub mod config;
pub mod constants;
pub mod telemetry;

pub use config::AppConfig;
