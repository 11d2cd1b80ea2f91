//! Best-effort email notification.
//!
//! Completed interview summaries are mailed to a configured administrator
//! address. Delivery is strictly best-effort: incomplete configuration makes
//! [`EmailNotifier::notify`] a silent no-op, and send failures are logged
//! and swallowed. Nothing here can fail an interview.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::EmailConfig;

/// Internal delivery errors; callers only ever see log lines.
#[derive(Debug, Error)]
enum NotifyError {
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP failure: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Sends interview summaries over SMTP when configured.
#[derive(Clone)]
pub struct EmailNotifier {
    config: EmailConfig,
}

impl EmailNotifier {
    /// Create a new notifier
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Deliver a notification, best-effort.
    ///
    /// A no-op when any of sender, receiver, password, or relay host is
    /// unset. Errors are logged at warn and never propagated.
    pub async fn notify(&self, subject: &str, body: &str) {
        if !self.config.is_complete() {
            debug!("Email configuration is incomplete, skipping notification");
            return;
        }

        match self.send(subject, body).await {
            Ok(()) => info!(subject = %subject, "Notification email sent"),
            Err(e) => warn!(error = %e, "Failed to send notification email"),
        }
    }

    /// One STARTTLS SMTP send
    async fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        // is_complete() was checked by the caller
        let sender = self.config.sender.as_deref().unwrap_or_default();
        let receiver = self.config.receiver.as_deref().unwrap_or_default();
        let password = self.config.password.as_deref().unwrap_or_default();
        let host = self.config.smtp_host.as_deref().unwrap_or_default();

        let email = Message::builder()
            .from(sender.parse()?)
            .to(receiver.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(sender.to_string(), password.to_string()))
            .build();

        transport.send(email).await?;

        Ok(())
    }
}
