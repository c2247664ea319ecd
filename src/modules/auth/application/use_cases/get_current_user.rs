use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::auth::application::domain::entities::Account;
use crate::auth::application::ports::outgoing::{AccountRepository, TokenProvider, TokenType};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GetCurrentUserError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Account is not allowed to access this resource")]
    Forbidden,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Resolves a bearer access token to the account behind it. Used as the
/// authorization guard for every endpoint that needs an identity.
#[async_trait]
pub trait IGetCurrentUserUseCase: Send + Sync {
    async fn execute(&self, access_token: &str) -> Result<Account, GetCurrentUserError>;
}

pub struct GetCurrentUserUseCase<R>
where
    R: AccountRepository,
{
    repository: R,
    token_provider: Arc<dyn TokenProvider>,
}

impl<R> GetCurrentUserUseCase<R>
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
impl<R> IGetCurrentUserUseCase for GetCurrentUserUseCase<R>
where
    R: AccountRepository,
{
    async fn execute(&self, access_token: &str) -> Result<Account, GetCurrentUserError> {
        let claims = self.token_provider.decode_token(access_token).map_err(|e| {
            debug!(error = %e, "Access token rejected");
            GetCurrentUserError::Unauthenticated
        })?;

        if claims.token_type != TokenType::Access {
            return Err(GetCurrentUserError::Unauthenticated);
        }

        let account = self
            .repository
            .find_by_id(claims.sub)
            .await
            .map_err(|e| GetCurrentUserError::RepositoryError(e.to_string()))?
            .ok_or(GetCurrentUserError::Unauthenticated)?;

        if !account.is_active() {
            return Err(GetCurrentUserError::Forbidden);
        }

        Ok(account)
    }
}
