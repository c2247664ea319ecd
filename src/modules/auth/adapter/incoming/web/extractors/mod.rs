mod auth;

pub use auth::CurrentAccount;
