use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::email::application::ports::outgoing::{
    AccountEmailNotifier, EmailSender, NotificationError, OutgoingEmail,
};

pub const VERIFICATION_SUBJECT: &str = "Verify your Alumni Connect account";
pub const PASSWORD_RESET_SUBJECT: &str = "Reset your Alumni Connect password";

/// Renders account emails and hands them to an [`EmailSender`].
#[derive(Clone)]
pub struct AccountEmailService {
    sender: Arc<dyn EmailSender>,
    frontend_url: String,
}

impl fmt::Debug for AccountEmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountEmailService")
            .field("sender", &"<dyn EmailSender>")
            .field("frontend_url", &self.frontend_url)
            .finish()
    }
}

impl AccountEmailService {
    pub fn new(sender: Arc<dyn EmailSender>, frontend_url: &str) -> Self {
        Self {
            sender,
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn verification_link(&self, token: &str) -> String {
        format!("{}/verify-email?token={}", self.frontend_url, token)
    }

    pub fn password_reset_link(&self, token: &str) -> String {
        format!("{}/reset-password?token={}", self.frontend_url, token)
    }

    fn verification_email(&self, to_email: &str, token: &str) -> OutgoingEmail {
        let link = self.verification_link(token);
        let html_body = format!(
            r#"<html>
  <body>
    <h2>Welcome to Alumni Connect!</h2>
    <p>Please confirm your email address by clicking the link below:</p>
    <p><a href="{link}">Verify my email</a></p>
    <p>This link is valid for 24 hours.</p>
    <p>If you did not create an account, you can ignore this message.</p>
  </body>
</html>"#
        );
        let text_body = format!(
            "Welcome to Alumni Connect!\n\n\
             Please confirm your email address by opening this link:\n{link}\n\n\
             This link is valid for 24 hours.\n\
             If you did not create an account, you can ignore this message.\n"
        );

        OutgoingEmail {
            to: to_email.to_string(),
            subject: VERIFICATION_SUBJECT.to_string(),
            html_body,
            text_body,
        }
    }

    fn password_reset_email(&self, to_email: &str, token: &str) -> OutgoingEmail {
        let link = self.password_reset_link(token);
        let html_body = format!(
            r#"<html>
  <body>
    <h2>Password reset requested</h2>
    <p>Click the link below to choose a new password:</p>
    <p><a href="{link}">Reset my password</a></p>
    <p>This link is valid for 1 hour.</p>
    <p>If you did not request a reset, you can ignore this message.</p>
  </body>
</html>"#
        );
        let text_body = format!(
            "Password reset requested\n\n\
             Open this link to choose a new password:\n{link}\n\n\
             This link is valid for 1 hour.\n\
             If you did not request a reset, you can ignore this message.\n"
        );

        OutgoingEmail {
            to: to_email.to_string(),
            subject: PASSWORD_RESET_SUBJECT.to_string(),
            html_body,
            text_body,
        }
    }
}

#[async_trait]
impl AccountEmailNotifier for AccountEmailService {
    async fn send_verification_email(
        &self,
        to_email: &str,
        token: &str,
    ) -> Result<(), NotificationError> {
        self.sender
            .send_email(self.verification_email(to_email, token))
            .await
            .map_err(|e| NotificationError::EmailSendingFailed(e.to_string()))
    }

    async fn send_password_reset_email(
        &self,
        to_email: &str,
        token: &str,
    ) -> Result<(), NotificationError> {
        self.sender
            .send_email(self.password_reset_email(to_email, token))
            .await
            .map_err(|e| NotificationError::EmailSendingFailed(e.to_string()))
    }
}
