use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use crate::email::application::ports::outgoing::{EmailError, EmailSender, OutgoingEmail};

/// Implicit TLS port; every other port negotiates STARTTLS.
pub const SMTPS_PORT: u16 = 465;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Message) -> Result<(), String>;
}

#[async_trait]
impl Mailer for AsyncSmtpTransport<Tokio1Executor> {
    async fn send(&self, email: Message) -> Result<(), String> {
        AsyncTransport::send(self, email)
            .await
            .map(|_resp| ())
            .map_err(|e| e.to_string())
    }
}

pub struct SmtpEmailSender {
    mailer: Box<dyn Mailer>,
    from_email: String,
}

impl SmtpEmailSender {
    pub fn new_with_mailer(mailer: Box<dyn Mailer>, from_email: &str) -> Self {
        Self {
            mailer,
            from_email: from_email.to_string(),
        }
    }

    pub fn new(
        host: &str,
        port: u16,
        username: &str,
        password: &str,
        from_email: &str,
    ) -> Result<Self, EmailError> {
        let builder = if port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        }
        .map_err(|e| EmailError::TransportFailed(e.to_string()))?
        .port(port);

        let builder = if username.is_empty() {
            builder
        } else {
            builder.credentials(Credentials::new(
                username.to_string(),
                password.to_string(),
            ))
        };

        info!(host, port, "SMTP email sender configured");

        Ok(Self {
            mailer: Box::new(builder.build()),
            from_email: from_email.to_string(),
        })
    }

    // Local/test constructor (Mailpit, MailHog, etc.)
    pub fn new_local(host: &str, port: u16, from_email: &str) -> Self {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self {
            mailer: Box::new(transport),
            from_email: from_email.to_string(),
        }
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, EmailError> {
        let from: Mailbox = self
            .from_email
            .parse()
            .map_err(|e| EmailError::InvalidAddress(format!("from '{}': {}", self.from_email, e)))?;
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| EmailError::InvalidAddress(format!("to '{}': {}", email.to, e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.text_body.clone(),
                email.html_body.clone(),
            ))
            .map_err(|e| EmailError::BuildFailed(e.to_string()))
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_email(&self, email: OutgoingEmail) -> Result<(), EmailError> {
        let message = self.build_message(&email)?;

        self.mailer
            .send(message)
            .await
            .map_err(EmailError::TransportFailed)?;

        debug!(to = %email.to, subject = %email.subject, "Email delivered to SMTP relay");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    struct RecordingMailer {
        sent: Arc<Mutex<Vec<Message>>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: Message) -> Result<(), String> {
            self.sent.lock().unwrap().push(email);
            Ok(())
        }
    }

    struct UnreachableMailer;

    #[async_trait]
    impl Mailer for UnreachableMailer {
        async fn send(&self, _: Message) -> Result<(), String> {
            panic!("Should not reach mailer when the message cannot be built");
        }
    }

    struct FailingMailer;

    #[async_trait]
    impl Mailer for FailingMailer {
        async fn send(&self, _: Message) -> Result<(), String> {
            Err("connection refused".to_string())
        }
    }

    fn email(to: &str) -> OutgoingEmail {
        OutgoingEmail {
            to: to.to_string(),
            subject: "Verify your Alumni Connect account".to_string(),
            html_body: "<p>Click <a href=\"http://x/verify-email?token=t\">here</a></p>"
                .to_string(),
            text_body: "Open http://x/verify-email?token=t".to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_email_success_builds_multipart_message() {
        let mailer = RecordingMailer::default();
        let sent = mailer.sent.clone();
        let sender = SmtpEmailSender::new_with_mailer(Box::new(mailer), "noreply@alumni.edu");

        let result = sender.send_email(email("alice@x.edu")).await;

        assert!(result.is_ok(), "Expected Ok, got {:?}", result);
        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);

        let raw = String::from_utf8(sent[0].formatted()).unwrap();
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("To: alice@x.edu"));
    }

    #[tokio::test]
    async fn test_send_email_invalid_from_address() {
        let sender =
            SmtpEmailSender::new_with_mailer(Box::new(UnreachableMailer), "invalid-from-email");

        let result = sender.send_email(email("alice@x.edu")).await;

        assert!(matches!(result, Err(EmailError::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn test_send_email_invalid_to_address() {
        let sender =
            SmtpEmailSender::new_with_mailer(Box::new(UnreachableMailer), "noreply@alumni.edu");

        let result = sender.send_email(email("not-an-email")).await;

        match result {
            Err(EmailError::InvalidAddress(msg)) => assert!(msg.contains("not-an-email")),
            other => panic!("Expected InvalidAddress, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_email_transport_failure() {
        let sender = SmtpEmailSender::new_with_mailer(Box::new(FailingMailer), "noreply@alumni.edu");

        let result = sender.send_email(email("alice@x.edu")).await;

        assert_eq!(
            result,
            Err(EmailError::TransportFailed("connection refused".to_string()))
        );
    }

    #[tokio::test]
    async fn test_new_accepts_both_tls_modes() {
        assert!(SmtpEmailSender::new("smtp.example.com", 465, "user", "pass", "a@b.edu").is_ok());
        assert!(SmtpEmailSender::new("smtp.example.com", 587, "", "", "a@b.edu").is_ok());
    }
}
