use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::application::domain::entities::{Account, UserRole};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token encoding error: {0}")]
    EncodingError(String),
}

/// Discriminates the two bearer credentials. Serialized as the `type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid,
    pub email: String,
    pub role: UserRole,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
}

/// Identity embedded into issued tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSubject {
    pub account_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl From<&Account> for TokenSubject {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id,
            email: account.email.clone(),
            role: account.role,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenProvider: Send + Sync {
    fn generate_access_token(&self, subject: &TokenSubject) -> Result<String, TokenError>;
    fn generate_refresh_token(&self, subject: &TokenSubject) -> Result<String, TokenError>;
    /// Checks signature and expiry. Never panics on hostile input.
    fn decode_token(&self, token: &str) -> Result<TokenClaims, TokenError>;
    fn access_token_ttl_seconds(&self) -> i64;
}
