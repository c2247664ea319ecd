mod current_user;
mod dto;
mod login_user;
mod password_reset;
mod refresh_token;
mod register_account;
mod verify_email;

pub use current_user::{__path_current_user_handler, current_user_handler};
pub use dto::{AccountSummaryResponse, AccountViewResponse, MessageResponse, TokenPairDto};
pub use login_user::{__path_login_user_handler, login_user_handler, LoginRequestDto};
pub use password_reset::{
    __path_confirm_password_reset_handler, __path_request_password_reset_handler,
    confirm_password_reset_handler, request_password_reset_handler, ConfirmPasswordResetDto,
    RequestPasswordResetDto,
};
pub use refresh_token::{__path_refresh_token_handler, refresh_token_handler, RefreshTokenDto};
pub use register_account::{
    __path_register_account_handler, register_account_handler, RegisterAccountRequest,
};
pub use verify_email::{__path_verify_email_handler, verify_email_handler};
