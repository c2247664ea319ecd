use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use crate::email::application::ports::outgoing::{AccountEmailNotifier, NotificationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentEmail {
    Verification { to: String, token: String },
    PasswordReset { to: String, token: String },
}

/// Keeps every email it is asked to send.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    notify: Arc<Notify>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().await.clone()
    }

    /// Waits until at least `count` emails were recorded or the timeout hits.
    pub async fn wait_for(&self, count: usize) -> Vec<SentEmail> {
        let _ = tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                let notified = self.notify.notified();
                if self.sent.lock().await.len() >= count {
                    break;
                }
                notified.await;
            }
        })
        .await;

        self.sent().await
    }

    async fn record(&self, email: SentEmail) {
        self.sent.lock().await.push(email);
        self.notify.notify_waiters();
    }
}

#[async_trait]
impl AccountEmailNotifier for RecordingNotifier {
    async fn send_verification_email(
        &self,
        to_email: &str,
        token: &str,
    ) -> Result<(), NotificationError> {
        self.record(SentEmail::Verification {
            to: to_email.to_string(),
            token: token.to_string(),
        })
        .await;
        Ok(())
    }

    async fn send_password_reset_email(
        &self,
        to_email: &str,
        token: &str,
    ) -> Result<(), NotificationError> {
        self.record(SentEmail::PasswordReset {
            to: to_email.to_string(),
            token: token.to_string(),
        })
        .await;
        Ok(())
    }
}
