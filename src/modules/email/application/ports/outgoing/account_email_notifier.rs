use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationError {
    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

/// Delivers account lifecycle emails that carry a single-use token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountEmailNotifier: Send + Sync {
    async fn send_verification_email(
        &self,
        to_email: &str,
        token: &str,
    ) -> Result<(), NotificationError>;

    async fn send_password_reset_email(
        &self,
        to_email: &str,
        token: &str,
    ) -> Result<(), NotificationError>;
}
