use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::application::domain::entities::{AccountSummary, AccountView};
use crate::auth::application::use_cases::login_user::TokenPairResponse;

/// Public account representation
#[derive(Serialize, ToSchema)]
pub struct AccountViewResponse {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: Uuid,

    #[schema(example = "alice@x.edu")]
    pub email: String,

    /// `student` or `alumni`
    #[schema(example = "student")]
    pub role: String,

    #[schema(example = false)]
    pub email_verified: bool,

    pub created_at: DateTime<Utc>,
}

impl From<AccountView> for AccountViewResponse {
    fn from(view: AccountView) -> Self {
        Self {
            id: view.id,
            email: view.email,
            role: view.role.to_string(),
            email_verified: view.email_verified,
            created_at: view.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct AccountSummaryResponse {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: Uuid,

    #[schema(example = "alice@x.edu")]
    pub email: String,

    #[schema(example = "student")]
    pub role: String,

    #[schema(example = true)]
    pub email_verified: bool,
}

impl From<AccountSummary> for AccountSummaryResponse {
    fn from(summary: AccountSummary) -> Self {
        Self {
            id: summary.id,
            email: summary.email,
            role: summary.role.to_string(),
            email_verified: summary.email_verified,
        }
    }
}

/// Bearer credentials returned by login and refresh
#[derive(Serialize, ToSchema)]
pub struct TokenPairDto {
    /// Short-lived JWT for the `Authorization: Bearer` header
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,

    /// Long-lived JWT accepted only by the refresh endpoint
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh_token: String,

    #[schema(example = "bearer")]
    pub token_type: String,

    /// Access token lifetime in seconds
    #[schema(example = 3600)]
    pub expires_in: i64,

    pub user: AccountSummaryResponse,
}

impl From<TokenPairResponse> for TokenPairDto {
    fn from(pair: TokenPairResponse) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
            user: pair.user.into(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Email verified successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
