use async_trait::async_trait;
use tracing::info;

use crate::email::application::ports::outgoing::{EmailError, EmailSender, OutgoingEmail};

/// Used when no SMTP relay is configured: the email is written to the log
/// so local developers can still follow verification links.
#[derive(Debug, Default, Clone)]
pub struct LogEmailSender;

impl LogEmailSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send_email(&self, email: OutgoingEmail) -> Result<(), EmailError> {
        info!(
            to = %email.to,
            subject = %email.subject,
            body = %email.text_body,
            "SMTP not configured, email logged instead of sent"
        );
        Ok(())
    }
}
