use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::application::domain::entities::{
    Account, AccountStatus, TenantId, UserRole, VerificationToken,
    VerificationTokenType,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AccountRepositoryError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Token already redeemed or expired")]
    TokenAlreadyRedeemed,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub tenant_id: TenantId,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    /// Email verification token stored together with the account.
    pub verification_token: String,
    pub verification_expires_at: DateTime<Utc>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountUpdate {
    pub status: Option<AccountStatus>,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub password_hash: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewVerificationToken {
    pub account_id: Uuid,
    pub token: String,
    pub token_type: VerificationTokenType,
    pub expires_at: DateTime<Utc>,
}

/// What redeeming a token does to the owning account.
#[derive(Debug, Clone, PartialEq)]
pub enum RedemptionEffect {
    VerifyEmail,
    ResetPassword { password_hash: String },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountRepositoryError>;

    async fn find_by_id(&self, account_id: Uuid)
        -> Result<Option<Account>, AccountRepositoryError>;

    /// Inserts the account, its empty role profile and its email verification
    /// token in one transaction.
    async fn create_account_with_profile(
        &self,
        account: NewAccount,
    ) -> Result<Account, AccountRepositoryError>;

    async fn update(
        &self,
        account_id: Uuid,
        changes: AccountUpdate,
    ) -> Result<Account, AccountRepositoryError>;

    async fn create_verification_token(
        &self,
        token: NewVerificationToken,
    ) -> Result<VerificationToken, AccountRepositoryError>;

    async fn find_redeemable_token(
        &self,
        token: &str,
        token_type: VerificationTokenType,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationToken>, AccountRepositoryError>;

    /// Flips `used` only if it is still false.
    async fn mark_token_used(&self, token_id: Uuid) -> Result<(), AccountRepositoryError>;

    /// Marks the token used and applies `effect` to its account, all or nothing.
    /// Losing a concurrent redemption yields `TokenAlreadyRedeemed`.
    async fn redeem_token(
        &self,
        token: &VerificationToken,
        effect: RedemptionEffect,
        now: DateTime<Utc>,
    ) -> Result<(), AccountRepositoryError>;
}
