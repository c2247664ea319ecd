use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::auth::application::domain::entities::VerificationTokenType;
use crate::auth::application::ports::incoming::password_policy::PasswordPolicy;
use crate::auth::application::ports::outgoing::{
    AccountRepository, AccountRepositoryError, PasswordHasher, RedemptionEffect,
};

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordInput {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("{0}")]
    InvalidPassword(String),

    #[error("Invalid or expired reset token")]
    InvalidOrExpiredToken,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait IResetPasswordUseCase: Send + Sync {
    async fn execute(&self, input: ResetPasswordInput) -> Result<(), ResetPasswordError>;
}

pub struct ResetPasswordUseCase<R>
where
    R: AccountRepository,
{
    repository: R,
    password_policy: Arc<dyn PasswordPolicy>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl<R> ResetPasswordUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(
        repository: R,
        password_policy: Arc<dyn PasswordPolicy>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            repository,
            password_policy,
            password_hasher,
        }
    }
}

#[async_trait]
impl<R> IResetPasswordUseCase for ResetPasswordUseCase<R>
where
    R: AccountRepository,
{
    async fn execute(&self, input: ResetPasswordInput) -> Result<(), ResetPasswordError> {
        self.password_policy
            .validate(&input.new_password)
            .map_err(|e| ResetPasswordError::InvalidPassword(e.to_string()))?;

        let now = Utc::now();

        let stored = self
            .repository
            .find_redeemable_token(input.token.trim(), VerificationTokenType::PasswordReset, now)
            .await
            .map_err(|e| ResetPasswordError::RepositoryError(e.to_string()))?
            .ok_or(ResetPasswordError::InvalidOrExpiredToken)?;

        let password_hash = self
            .password_hasher
            .hash_password(&input.new_password)
            .await
            .map_err(|e| ResetPasswordError::HashingFailed(e.to_string()))?;

        self.repository
            .redeem_token(&stored, RedemptionEffect::ResetPassword { password_hash }, now)
            .await
            .map_err(|e| match e {
                AccountRepositoryError::TokenAlreadyRedeemed => {
                    ResetPasswordError::InvalidOrExpiredToken
                }
                AccountRepositoryError::AccountNotFound => ResetPasswordError::AccountNotFound,
                other => ResetPasswordError::RepositoryError(other.to_string()),
            })?;

        info!(account_id = %stored.account_id, "Password reset");
        Ok(())
    }
}
