//! SMTP mailer backed by lettre

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use hms_core::error::DomainError;
use hms_core::mailer::Mailer;
use hms_shared::config::SmtpSettings;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self, DomainError> {
        let from: Mailbox = settings
            .from_address
            .parse()
            .map_err(|_| DomainError::EmailError(format!(
                "Invalid from address: {}",
                settings.from_address
            )))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(|e| DomainError::EmailError(e.to_string()))?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DomainError> {
        let to: Mailbox = to
            .parse()
            .map_err(|_| DomainError::EmailError(format!("Invalid recipient: {}", to)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| DomainError::EmailError(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| DomainError::EmailError(e.to_string()))?;

        info!("Email sent: {}", subject);
        Ok(())
    }
}
