use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use crate::auth::application::domain::entities::VerificationTokenType;
use crate::auth::application::ports::outgoing::{
    AccountRepository, AccountRepositoryError, RedemptionEffect,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VerifyUserEmailError {
    #[error("Invalid or expired verification token")]
    InvalidOrExpiredToken,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait IVerifyUserEmailUseCase: Send + Sync {
    async fn execute(&self, token: &str) -> Result<(), VerifyUserEmailError>;
}

#[derive(Debug, Clone)]
pub struct VerifyUserEmailUseCase<R>
where
    R: AccountRepository,
{
    repository: R,
}

impl<R> VerifyUserEmailUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> IVerifyUserEmailUseCase for VerifyUserEmailUseCase<R>
where
    R: AccountRepository,
{
    async fn execute(&self, token: &str) -> Result<(), VerifyUserEmailError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(VerifyUserEmailError::InvalidOrExpiredToken);
        }

        let now = Utc::now();

        let stored = self
            .repository
            .find_redeemable_token(token, VerificationTokenType::EmailVerification, now)
            .await
            .map_err(|e| VerifyUserEmailError::RepositoryError(e.to_string()))?
            .ok_or(VerifyUserEmailError::InvalidOrExpiredToken)?;

        // The lookup above is only a fast path; the redemption itself is the
        // compare-and-swap that decides concurrent attempts.
        self.repository
            .redeem_token(&stored, RedemptionEffect::VerifyEmail, now)
            .await
            .map_err(|e| match e {
                AccountRepositoryError::TokenAlreadyRedeemed => {
                    VerifyUserEmailError::InvalidOrExpiredToken
                }
                AccountRepositoryError::AccountNotFound => {
                    warn!(account_id = %stored.account_id, "Verification token without account");
                    VerifyUserEmailError::AccountNotFound
                }
                other => VerifyUserEmailError::RepositoryError(other.to_string()),
            })?;

        info!(account_id = %stored.account_id, "Email verified");
        Ok(())
    }
}
