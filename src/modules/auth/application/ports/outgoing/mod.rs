pub mod account_repository;
pub mod password_hasher;
pub mod token_provider;
pub mod verification_token_generator;

pub use account_repository::{
    AccountRepository, AccountRepositoryError, AccountUpdate, NewAccount, NewVerificationToken,
    RedemptionEffect,
};
pub use password_hasher::{HashError, PasswordHasher};
pub use token_provider::{TokenClaims, TokenError, TokenProvider, TokenSubject, TokenType};
pub use verification_token_generator::VerificationTokenGenerator;
