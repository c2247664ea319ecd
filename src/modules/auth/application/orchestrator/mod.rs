pub mod email_delivery;
pub mod password_reset;
pub mod user_registration;

pub use email_delivery::RetryPolicy;
pub use password_reset::PasswordResetOrchestrator;
pub use user_registration::AccountRegistrationOrchestrator;
