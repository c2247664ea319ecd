pub mod argon2_hasher;
pub mod random_token_generator;

pub use argon2_hasher::Argon2Hasher;
pub use random_token_generator::RandomTokenGenerator;
