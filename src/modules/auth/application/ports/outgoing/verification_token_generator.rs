/// Source of opaque single-use tokens (email confirmation, password reset).
/// Output must be URL-safe and carry at least 128 bits of entropy.
#[cfg_attr(test, mockall::automock)]
pub trait VerificationTokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}
