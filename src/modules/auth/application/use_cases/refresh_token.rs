use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::auth::application::ports::outgoing::{AccountRepository, TokenProvider, TokenType};
use crate::auth::application::use_cases::login_user::{issue_token_pair, TokenPairResponse};

// ========================= Refresh Token Request =========================
/// Validated refresh token request
#[derive(Debug, Clone)]
pub struct RefreshTokenRequest {
    refresh_token: String, // Private - guaranteed non-empty
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefreshTokenRequestError {
    #[error("Refresh token cannot be empty")]
    EmptyToken,
}

impl RefreshTokenRequest {
    pub fn new(refresh_token: String) -> Result<Self, RefreshTokenRequestError> {
        let refresh_token = refresh_token.trim();

        if refresh_token.is_empty() {
            return Err(RefreshTokenRequestError::EmptyToken);
        }

        Ok(Self {
            refresh_token: refresh_token.to_string(),
        })
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }
}

// ====================== Refresh Token Error =============================
/// Every reason a refresh token is refused collapses into `InvalidToken`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RefreshTokenError {
    #[error("Invalid refresh token")]
    InvalidToken,

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

// ============================ Refresh Token Use Case =============================
#[async_trait]
pub trait IRefreshTokenUseCase: Send + Sync {
    async fn execute(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<TokenPairResponse, RefreshTokenError>;
}

/// Exchanges a refresh token for a new pair. The presented token is not
/// revoked and stays usable until it expires.
pub struct RefreshTokenUseCase<R>
where
    R: AccountRepository,
{
    repository: R,
    token_provider: Arc<dyn TokenProvider>,
}

impl<R> RefreshTokenUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repository: R, token_provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            repository,
            token_provider,
        }
    }
}

#[async_trait]
impl<R> IRefreshTokenUseCase for RefreshTokenUseCase<R>
where
    R: AccountRepository,
{
    async fn execute(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<TokenPairResponse, RefreshTokenError> {
        let claims = self
            .token_provider
            .decode_token(request.refresh_token())
            .map_err(|e| {
                debug!(error = %e, "Refresh token rejected");
                RefreshTokenError::InvalidToken
            })?;

        if claims.token_type != TokenType::Refresh {
            debug!(account_id = %claims.sub, "Non-refresh token presented for refresh");
            return Err(RefreshTokenError::InvalidToken);
        }

        let account = self
            .repository
            .find_by_id(claims.sub)
            .await
            .map_err(|e| RefreshTokenError::RepositoryError(e.to_string()))?
            .ok_or(RefreshTokenError::InvalidToken)?;

        if !account.is_active() {
            return Err(RefreshTokenError::InvalidToken);
        }

        issue_token_pair(self.token_provider.as_ref(), &account)
            .map_err(|e| RefreshTokenError::TokenGenerationFailed(e.to_string()))
    }
}
