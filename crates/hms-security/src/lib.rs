//! # HMS Security
//!
//! Security utilities: JWT issuance/verification and password hashing.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtService};
pub use password::PasswordService;
