use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::auth::application::ports::outgoing::VerificationTokenGenerator;

const TOKEN_BYTES: usize = 32;

/// 256 bits from the OS CSPRNG, base64url encoded without padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenGenerator;

impl VerificationTokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}
