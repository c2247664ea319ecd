use std::sync::Arc;

use crate::auth::application::orchestrator::email_delivery::{spawn_email_delivery, RetryPolicy};
use crate::auth::application::use_cases::request_password_reset::{
    IRequestPasswordResetUseCase, RequestPasswordResetError,
};
use crate::email::application::ports::outgoing::AccountEmailNotifier;

/// Issues a reset token and mails it in the background. Whether an account
/// matched is invisible to the caller.
#[derive(Clone)]
pub struct PasswordResetOrchestrator {
    request_reset_use_case: Arc<dyn IRequestPasswordResetUseCase>,
    email_notifier: Arc<dyn AccountEmailNotifier>,
    retry_policy: RetryPolicy,
}

impl PasswordResetOrchestrator {
    pub fn new(
        request_reset_use_case: Arc<dyn IRequestPasswordResetUseCase>,
        email_notifier: Arc<dyn AccountEmailNotifier>,
    ) -> Self {
        Self {
            request_reset_use_case,
            email_notifier,
            retry_policy: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub async fn request_reset(&self, email: &str) -> Result<(), RequestPasswordResetError> {
        let Some(ticket) = self.request_reset_use_case.execute(email).await? else {
            return Ok(());
        };

        let notifier = self.email_notifier.clone();
        let recipient = ticket.email.clone();

        spawn_email_delivery(self.retry_policy, "password_reset", recipient, move || {
            let notifier = notifier.clone();
            let email = ticket.email.clone();
            let token = ticket.token.clone();
            async move { notifier.send_password_reset_email(&email, &token).await }
        });

        Ok(())
    }
}
