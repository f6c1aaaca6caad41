//! Session token generation

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::RngCore;

/// `length` random bytes from the thread-local CSPRNG, base64 encoded.
pub fn generate_session_token(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    rand::rng().fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}
