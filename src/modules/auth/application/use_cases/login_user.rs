use async_trait::async_trait;
use chrono::Utc;
use email_address::EmailAddress;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::auth::application::domain::entities::{Account, AccountSummary};
use crate::auth::application::ports::outgoing::{
    AccountRepository, AccountUpdate, PasswordHasher, TokenError, TokenProvider, TokenSubject,
};

// ========================= Login Request =========================
/// Login credentials with the email trimmed and checked for shape.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginRequestError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Password cannot be empty")]
    EmptyPassword,
}

impl LoginRequest {
    pub fn new(email: String, password: String) -> Result<Self, LoginRequestError> {
        let email = email.trim();

        if email.is_empty() {
            return Err(LoginRequestError::EmptyEmail);
        }

        if !EmailAddress::is_valid(email) {
            return Err(LoginRequestError::InvalidEmailFormat);
        }

        if password.is_empty() {
            return Err(LoginRequestError::EmptyPassword);
        }

        Ok(Self {
            email: email.to_string(),
            password,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// ====================== Login Error =============================
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is not active")]
    AccountNotActive,

    #[error("Password verification failed: {0}")]
    PasswordVerificationFailed(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

// ============================ Token Pair =================================
pub const BEARER_TOKEN_TYPE: &str = "bearer";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: AccountSummary,
}

/// Issues a fresh access/refresh pair for `account`.
pub(crate) fn issue_token_pair(
    token_provider: &dyn TokenProvider,
    account: &Account,
) -> Result<TokenPairResponse, TokenError> {
    let subject = TokenSubject::from(account);

    Ok(TokenPairResponse {
        access_token: token_provider.generate_access_token(&subject)?,
        refresh_token: token_provider.generate_refresh_token(&subject)?,
        token_type: BEARER_TOKEN_TYPE.to_string(),
        expires_in: token_provider.access_token_ttl_seconds(),
        user: account.summary(),
    })
}

// ============================ Login User Use Case =============================
#[async_trait]
pub trait ILoginUserUseCase: Send + Sync {
    async fn execute(&self, request: LoginRequest) -> Result<TokenPairResponse, LoginError>;
}

pub struct LoginUserUseCase<R>
where
    R: AccountRepository,
{
    repository: R,
    password_hasher: Arc<dyn PasswordHasher>,
    token_provider: Arc<dyn TokenProvider>,
    // Digest verified against when the email is unknown
    dummy_hash: OnceCell<String>,
}

impl<R> LoginUserUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(
        repository: R,
        password_hasher: Arc<dyn PasswordHasher>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            repository,
            password_hasher,
            token_provider,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Burns roughly the same time as a real verification so that an unknown
    /// email cannot be told apart from a wrong password.
    async fn verify_against_dummy(&self, password: &str) {
        let dummy = self
            .dummy_hash
            .get_or_try_init(|| self.password_hasher.hash_password("dummy-password-for-timing"))
            .await;

        if let Ok(hash) = dummy {
            let _ = self.password_hasher.verify_password(password, hash).await;
        }
    }
}

#[async_trait]
impl<R> ILoginUserUseCase for LoginUserUseCase<R>
where
    R: AccountRepository,
{
    async fn execute(&self, request: LoginRequest) -> Result<TokenPairResponse, LoginError> {
        let account = self
            .repository
            .find_by_email(request.email())
            .await
            .map_err(|e| LoginError::RepositoryError(e.to_string()))?;

        let account = match account {
            Some(account) => account,
            None => {
                self.verify_against_dummy(request.password()).await;
                debug!("Login attempt for unknown email");
                return Err(LoginError::InvalidCredentials);
            }
        };

        let is_valid = self
            .password_hasher
            .verify_password(request.password(), &account.password_hash)
            .await
            .map_err(|e| LoginError::PasswordVerificationFailed(e.to_string()))?;

        if !is_valid {
            debug!(account_id = %account.id, "Login attempt with wrong password");
            return Err(LoginError::InvalidCredentials);
        }

        if !account.is_active() {
            return Err(LoginError::AccountNotActive);
        }

        let account = self
            .repository
            .update(
                account.id,
                AccountUpdate {
                    last_login_at: Some(Utc::now()),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| LoginError::RepositoryError(e.to_string()))?;

        let response = issue_token_pair(self.token_provider.as_ref(), &account)
            .map_err(|e| LoginError::TokenGenerationFailed(e.to_string()))?;

        info!(account_id = %account.id, "Account logged in");
        Ok(response)
    }
}
