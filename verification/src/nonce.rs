//! Nonce generation.

use froglink_types::Nonce;
use rand::rngs::OsRng;
use rand::RngCore;

/// Bytes of entropy per nonce; hex-encoded to twice as many characters.
const NONCE_BYTES: usize = 16;

/// Generate a fresh random nonce from the OS entropy source.
pub fn generate_nonce() -> Nonce {
    let mut bytes = [0u8; NONCE_BYTES];
    OsRng.fill_bytes(&mut bytes);
    Nonce::new(hex::encode(bytes))
}
