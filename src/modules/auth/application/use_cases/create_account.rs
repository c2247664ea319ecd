use async_trait::async_trait;
use chrono::{Duration, Utc};
use email_address::EmailAddress;
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::application::domain::entities::{Account, TenantId, UserRole};
use crate::auth::application::ports::incoming::password_policy::PasswordPolicy;
use crate::auth::application::ports::outgoing::{
    AccountRepository, AccountRepositoryError, NewAccount, PasswordHasher,
    VerificationTokenGenerator,
};

pub const EMAIL_VERIFICATION_TTL_HOURS: i64 = 24;

// ========================= Input / Output =========================
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    pub email: String,
    pub password: String,
    pub role: UserRole,
    /// Raw tenant identifier as supplied by the client.
    pub tenant_id: String,
}

/// The persisted account plus the plaintext verification token that must be
/// delivered to the owner. The token never leaves the server any other way.
#[derive(Debug, Clone)]
pub struct CreateAccountOutput {
    pub account: Account,
    pub verification_token: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CreateAccountError {
    #[error("Invalid email format")]
    InvalidEmail,

    #[error("{0}")]
    InvalidPassword(String),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<AccountRepositoryError> for CreateAccountError {
    fn from(err: AccountRepositoryError) -> Self {
        match err {
            AccountRepositoryError::DuplicateEmail => CreateAccountError::DuplicateEmail,
            other => CreateAccountError::RepositoryError(other.to_string()),
        }
    }
}

// ========================= Use Case =========================
#[async_trait]
pub trait ICreateAccountUseCase: Send + Sync {
    async fn execute(&self, input: CreateAccountInput)
        -> Result<CreateAccountOutput, CreateAccountError>;
}

#[derive(Clone)]
pub struct CreateAccountUseCase<R>
where
    R: AccountRepository,
{
    repository: R,
    password_policy: Arc<dyn PasswordPolicy>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_generator: Arc<dyn VerificationTokenGenerator>,
}

impl<R> CreateAccountUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(
        repository: R,
        password_policy: Arc<dyn PasswordPolicy>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_generator: Arc<dyn VerificationTokenGenerator>,
    ) -> Self {
        Self {
            repository,
            password_policy,
            password_hasher,
            token_generator,
        }
    }
}

#[async_trait]
impl<R> ICreateAccountUseCase for CreateAccountUseCase<R>
where
    R: AccountRepository,
{
    async fn execute(
        &self,
        input: CreateAccountInput,
    ) -> Result<CreateAccountOutput, CreateAccountError> {
        // Stored exactly as given, apart from surrounding whitespace
        let email = input.email.trim().to_string();
        if !EmailAddress::is_valid(&email) {
            return Err(CreateAccountError::InvalidEmail);
        }

        self.password_policy
            .validate(&input.password)
            .map_err(|e| CreateAccountError::InvalidPassword(e.to_string()))?;

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(CreateAccountError::DuplicateEmail);
        }

        let (tenant_id, substituted) = TenantId::parse_or_generate(&input.tenant_id);
        if substituted {
            warn!(
                raw_tenant_id = %input.tenant_id,
                substitute = %tenant_id.value(),
                "Malformed tenant id, substituted a generated one"
            );
        }

        let password_hash = self
            .password_hasher
            .hash_password(&input.password)
            .await
            .map_err(|e| CreateAccountError::HashingFailed(e.to_string()))?;

        // A concurrent registration can still win the race; the repository
        // reports that as DuplicateEmail.
        let verification_token = self.token_generator.generate();
        let account = self
            .repository
            .create_account_with_profile(NewAccount {
                tenant_id,
                email,
                password_hash,
                role: input.role,
                verification_token: verification_token.clone(),
                verification_expires_at: Utc::now()
                    + Duration::hours(EMAIL_VERIFICATION_TTL_HOURS),
            })
            .await?;

        info!(account_id = %account.id, role = %account.role, "Account registered");

        Ok(CreateAccountOutput {
            account,
            verification_token,
        })
    }
}
