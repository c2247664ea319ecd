pub mod account_email_notifier;
pub mod email_sender;

pub use account_email_notifier::{AccountEmailNotifier, NotificationError};
pub use email_sender::{EmailError, EmailSender, OutgoingEmail};
