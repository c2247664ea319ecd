use async_trait::async_trait;
use chrono::{Duration, Utc};
use email_address::EmailAddress;
use std::sync::Arc;
use tracing::debug;

use crate::auth::application::domain::entities::VerificationTokenType;
use crate::auth::application::ports::outgoing::{
    AccountRepository, NewVerificationToken, VerificationTokenGenerator,
};

pub const PASSWORD_RESET_TTL_HOURS: i64 = 1;

/// Token to mail to the owner of `email`.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordResetTicket {
    pub email: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestPasswordResetError {
    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Returns `None` when there is nobody to notify. Callers must answer the
/// client identically in both cases.
#[async_trait]
pub trait IRequestPasswordResetUseCase: Send + Sync {
    async fn execute(
        &self,
        email: &str,
    ) -> Result<Option<PasswordResetTicket>, RequestPasswordResetError>;
}

pub struct RequestPasswordResetUseCase<R>
where
    R: AccountRepository,
{
    repository: R,
    token_generator: Arc<dyn VerificationTokenGenerator>,
}

impl<R> RequestPasswordResetUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repository: R, token_generator: Arc<dyn VerificationTokenGenerator>) -> Self {
        Self {
            repository,
            token_generator,
        }
    }
}

#[async_trait]
impl<R> IRequestPasswordResetUseCase for RequestPasswordResetUseCase<R>
where
    R: AccountRepository,
{
    async fn execute(
        &self,
        email: &str,
    ) -> Result<Option<PasswordResetTicket>, RequestPasswordResetError> {
        let email = email.trim();
        if !EmailAddress::is_valid(email) {
            return Err(RequestPasswordResetError::InvalidEmail);
        }

        let account = self
            .repository
            .find_by_email(email)
            .await
            .map_err(|e| RequestPasswordResetError::RepositoryError(e.to_string()))?;

        let account = match account {
            Some(account) if account.is_active() => account,
            _ => {
                debug!("Password reset requested for unknown or inactive account");
                return Ok(None);
            }
        };

        let token = self.token_generator.generate();
        self.repository
            .create_verification_token(NewVerificationToken {
                account_id: account.id,
                token: token.clone(),
                token_type: VerificationTokenType::PasswordReset,
                expires_at: Utc::now() + Duration::hours(PASSWORD_RESET_TTL_HOURS),
            })
            .await
            .map_err(|e| RequestPasswordResetError::RepositoryError(e.to_string()))?;

        Ok(Some(PasswordResetTicket {
            email: account.email,
            token,
        }))
    }
}
