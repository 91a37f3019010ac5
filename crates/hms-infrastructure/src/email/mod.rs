//! Outbound email (SMTP adapter)

pub mod smtp;

pub use smtp::SmtpMailer;
