pub mod create_account;
pub mod get_current_user;
pub mod login_user;
pub mod refresh_token;
pub mod request_password_reset;
pub mod reset_password;
pub mod verify_user_email;
