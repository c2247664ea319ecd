use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, warn};

use crate::email::application::ports::outgoing::NotificationError;

/// Bounded exponential backoff for background email delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Delay after the given failed attempt (1-based): base, 2x base, 4x base...
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2_u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

/// Runs `send` on a detached task until it succeeds or the policy gives up.
/// The outcome is only logged; the handle resolves to whether delivery worked.
pub fn spawn_email_delivery<F, Fut>(
    policy: RetryPolicy,
    kind: &'static str,
    recipient: String,
    mut send: F,
) -> JoinHandle<bool>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), NotificationError>> + Send,
{
    tokio::spawn(async move {
        let max_attempts = policy.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match send().await {
                Ok(()) => return true,
                Err(e) if attempt < max_attempts => {
                    warn!(
                        kind,
                        recipient = %recipient,
                        attempt,
                        max_attempts,
                        error = %e,
                        "Email delivery failed, retrying"
                    );
                    tokio::time::sleep(policy.delay_after(attempt)).await;
                }
                Err(e) => {
                    error!(
                        kind,
                        recipient = %recipient,
                        max_attempts,
                        error = %e,
                        "Email delivery abandoned"
                    );
                }
            }
        }

        false
    })
}
