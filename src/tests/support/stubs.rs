use async_trait::async_trait;

use crate::auth::application::domain::entities::Account;
use crate::auth::application::use_cases::create_account::{
    CreateAccountError, CreateAccountInput, CreateAccountOutput, ICreateAccountUseCase,
};
use crate::auth::application::use_cases::get_current_user::{
    GetCurrentUserError, IGetCurrentUserUseCase,
};
use crate::auth::application::use_cases::login_user::{
    ILoginUserUseCase, LoginError, LoginRequest, TokenPairResponse,
};
use crate::auth::application::use_cases::refresh_token::{
    IRefreshTokenUseCase, RefreshTokenError, RefreshTokenRequest,
};
use crate::auth::application::use_cases::request_password_reset::{
    IRequestPasswordResetUseCase, PasswordResetTicket, RequestPasswordResetError,
};
use crate::auth::application::use_cases::reset_password::{
    IResetPasswordUseCase, ResetPasswordError, ResetPasswordInput,
};
use crate::auth::application::use_cases::verify_user_email::{
    IVerifyUserEmailUseCase, VerifyUserEmailError,
};
use crate::email::application::ports::outgoing::{AccountEmailNotifier, NotificationError};

// Defaults used by TestAppStateBuilder for the endpoints a test does not touch.

const UNUSED: &str = "not used in this test";

pub struct StubCreateAccountUseCase;

#[async_trait]
impl ICreateAccountUseCase for StubCreateAccountUseCase {
    async fn execute(
        &self,
        _input: CreateAccountInput,
    ) -> Result<CreateAccountOutput, CreateAccountError> {
        Err(CreateAccountError::RepositoryError(UNUSED.to_string()))
    }
}

pub struct StubLoginUserUseCase;

#[async_trait]
impl ILoginUserUseCase for StubLoginUserUseCase {
    async fn execute(&self, _request: LoginRequest) -> Result<TokenPairResponse, LoginError> {
        Err(LoginError::RepositoryError(UNUSED.to_string()))
    }
}

pub struct StubRefreshTokenUseCase;

#[async_trait]
impl IRefreshTokenUseCase for StubRefreshTokenUseCase {
    async fn execute(
        &self,
        _request: RefreshTokenRequest,
    ) -> Result<TokenPairResponse, RefreshTokenError> {
        Err(RefreshTokenError::RepositoryError(UNUSED.to_string()))
    }
}

/// Resolves every bearer token to `account`, or fails with `error`.
pub struct StubGetCurrentUserUseCase {
    pub result: Result<Account, GetCurrentUserError>,
}

impl StubGetCurrentUserUseCase {
    pub fn unauthenticated() -> Self {
        Self {
            result: Err(GetCurrentUserError::Unauthenticated),
        }
    }
}

#[async_trait]
impl IGetCurrentUserUseCase for StubGetCurrentUserUseCase {
    async fn execute(&self, _access_token: &str) -> Result<Account, GetCurrentUserError> {
        self.result.clone()
    }
}

pub struct StubVerifyUserEmailUseCase;

#[async_trait]
impl IVerifyUserEmailUseCase for StubVerifyUserEmailUseCase {
    async fn execute(&self, _token: &str) -> Result<(), VerifyUserEmailError> {
        Err(VerifyUserEmailError::RepositoryError(UNUSED.to_string()))
    }
}

pub struct StubRequestPasswordResetUseCase;

#[async_trait]
impl IRequestPasswordResetUseCase for StubRequestPasswordResetUseCase {
    async fn execute(
        &self,
        _email: &str,
    ) -> Result<Option<PasswordResetTicket>, RequestPasswordResetError> {
        Ok(None)
    }
}

pub struct StubResetPasswordUseCase;

#[async_trait]
impl IResetPasswordUseCase for StubResetPasswordUseCase {
    async fn execute(&self, _input: ResetPasswordInput) -> Result<(), ResetPasswordError> {
        Err(ResetPasswordError::RepositoryError(UNUSED.to_string()))
    }
}

pub struct StubAccountEmailNotifier;

#[async_trait]
impl AccountEmailNotifier for StubAccountEmailNotifier {
    async fn send_verification_email(
        &self,
        _to_email: &str,
        _token: &str,
    ) -> Result<(), NotificationError> {
        Ok(())
    }

    async fn send_password_reset_email(
        &self,
        _to_email: &str,
        _token: &str,
    ) -> Result<(), NotificationError> {
        Ok(())
    }
}
