use std::sync::Arc;

use crate::auth::application::domain::entities::AccountView;
use crate::auth::application::orchestrator::email_delivery::{spawn_email_delivery, RetryPolicy};
use crate::auth::application::use_cases::create_account::{
    CreateAccountError, CreateAccountInput, ICreateAccountUseCase,
};
use crate::email::application::ports::outgoing::AccountEmailNotifier;

// ============================================================================
// Account Registration Orchestrator
// ============================================================================

#[derive(Clone)]
pub struct AccountRegistrationOrchestrator {
    create_account_use_case: Arc<dyn ICreateAccountUseCase>,
    email_notifier: Arc<dyn AccountEmailNotifier>,
    retry_policy: RetryPolicy,
}

impl AccountRegistrationOrchestrator {
    pub fn new(
        create_account_use_case: Arc<dyn ICreateAccountUseCase>,
        email_notifier: Arc<dyn AccountEmailNotifier>,
    ) -> Self {
        Self {
            create_account_use_case,
            email_notifier,
            retry_policy: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Creates the account, then sends the verification email on a background
    /// task. Delivery problems never change the result.
    pub async fn register_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<AccountView, CreateAccountError> {
        let created = self.create_account_use_case.execute(input).await?;

        let notifier = self.email_notifier.clone();
        let email = created.account.email.clone();
        let token = created.verification_token;

        spawn_email_delivery(
            self.retry_policy,
            "email_verification",
            email.clone(),
            move || {
                let notifier = notifier.clone();
                let email = email.clone();
                let token = token.clone();
                async move { notifier.send_verification_email(&email, &token).await }
            },
        );

        Ok(created.account.public_view())
    }
}
