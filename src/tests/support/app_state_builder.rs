use std::sync::Arc;

use actix_web::web;

use crate::auth::application::orchestrator::{
    AccountRegistrationOrchestrator, PasswordResetOrchestrator,
};
use crate::auth::application::use_cases::{
    create_account::ICreateAccountUseCase, get_current_user::IGetCurrentUserUseCase,
    login_user::ILoginUserUseCase, refresh_token::IRefreshTokenUseCase,
    request_password_reset::IRequestPasswordResetUseCase, reset_password::IResetPasswordUseCase,
    verify_user_email::IVerifyUserEmailUseCase,
};
use crate::email::application::ports::outgoing::AccountEmailNotifier;
use crate::tests::support::stubs::*;
use crate::AppState;

pub struct TestAppStateBuilder {
    create_account: Arc<dyn ICreateAccountUseCase>,
    request_password_reset: Arc<dyn IRequestPasswordResetUseCase>,
    email_notifier: Arc<dyn AccountEmailNotifier>,
    login_user: Arc<dyn ILoginUserUseCase>,
    refresh_token: Arc<dyn IRefreshTokenUseCase>,
    get_current_user: Arc<dyn IGetCurrentUserUseCase>,
    verify_user_email: Arc<dyn IVerifyUserEmailUseCase>,
    reset_password: Arc<dyn IResetPasswordUseCase>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            create_account: Arc::new(StubCreateAccountUseCase),
            request_password_reset: Arc::new(StubRequestPasswordResetUseCase),
            email_notifier: Arc::new(StubAccountEmailNotifier),
            login_user: Arc::new(StubLoginUserUseCase),
            refresh_token: Arc::new(StubRefreshTokenUseCase),
            get_current_user: Arc::new(StubGetCurrentUserUseCase::unauthenticated()),
            verify_user_email: Arc::new(StubVerifyUserEmailUseCase),
            reset_password: Arc::new(StubResetPasswordUseCase),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_create_account(mut self, uc: impl ICreateAccountUseCase + 'static) -> Self {
        self.create_account = Arc::new(uc);
        self
    }

    pub fn with_request_password_reset(
        mut self,
        uc: impl IRequestPasswordResetUseCase + 'static,
    ) -> Self {
        self.request_password_reset = Arc::new(uc);
        self
    }

    pub fn with_email_notifier(mut self, notifier: impl AccountEmailNotifier + 'static) -> Self {
        self.email_notifier = Arc::new(notifier);
        self
    }

    pub fn with_login_user(mut self, uc: impl ILoginUserUseCase + 'static) -> Self {
        self.login_user = Arc::new(uc);
        self
    }

    pub fn with_refresh_token(mut self, uc: impl IRefreshTokenUseCase + 'static) -> Self {
        self.refresh_token = Arc::new(uc);
        self
    }

    pub fn with_get_current_user(mut self, uc: impl IGetCurrentUserUseCase + 'static) -> Self {
        self.get_current_user = Arc::new(uc);
        self
    }

    pub fn with_verify_user_email(mut self, uc: impl IVerifyUserEmailUseCase + 'static) -> Self {
        self.verify_user_email = Arc::new(uc);
        self
    }

    pub fn with_reset_password(mut self, uc: impl IResetPasswordUseCase + 'static) -> Self {
        self.reset_password = Arc::new(uc);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        let register_account_orchestrator =
            AccountRegistrationOrchestrator::new(self.create_account, self.email_notifier.clone());
        let password_reset_orchestrator =
            PasswordResetOrchestrator::new(self.request_password_reset, self.email_notifier);

        web::Data::new(AppState {
            register_account_orchestrator: Arc::new(register_account_orchestrator),
            login_user_use_case: self.login_user,
            refresh_token_use_case: self.refresh_token,
            get_current_user_use_case: self.get_current_user,
            verify_user_email_use_case: self.verify_user_email,
            password_reset_orchestrator: Arc::new(password_reset_orchestrator),
            reset_password_use_case: self.reset_password,
        })
    }
}
