pub mod alumni;
pub mod students;
pub mod users;
pub mod verification_tokens;
