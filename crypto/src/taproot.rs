//! Taproot (BIP-341 key-path) address derivation and Schnorr verification.

use bitcoin::hashes::{sha256, Hash};
use bitcoin::secp256k1::{schnorr, Message, Secp256k1, XOnlyPublicKey};
use bitcoin::Address;
use froglink_types::BitcoinNetwork;

use crate::{rust_network, CryptoError};

/// Parse a hex public key into an x-only key.
///
/// Wallets hand out either the 32-byte x-only form or the 33-byte
/// compressed form; for the latter the parity prefix byte is dropped.
pub fn xonly_from_hex(pubkey_hex: &str) -> Result<XOnlyPublicKey, CryptoError> {
    let cleaned = pubkey_hex
        .trim()
        .strip_prefix("0x")
        .or_else(|| pubkey_hex.trim().strip_prefix("0X"))
        .unwrap_or_else(|| pubkey_hex.trim());
    let bytes = hex::decode(cleaned).map_err(|_| CryptoError::InvalidPubkey)?;
    let xonly_bytes = match bytes.len() {
        33 => &bytes[1..],
        32 => &bytes[..],
        _ => return Err(CryptoError::InvalidPubkey),
    };
    XOnlyPublicKey::from_slice(xonly_bytes).map_err(|_| CryptoError::InvalidPubkey)
}

/// Derive the single-key (no script tree) Taproot address for an internal
/// key. Pure: the same key always yields the same address.
pub fn taproot_address(internal_key: &XOnlyPublicKey, network: BitcoinNetwork) -> Address {
    let secp = Secp256k1::verification_only();
    Address::p2tr(&secp, *internal_key, None, rust_network(network))
}

/// Verify a Schnorr signature over SHA-256 of the message bytes.
///
/// This is the signing scheme Ordinals wallets use for plain-text
/// challenges: hash the UTF-8 message once with SHA-256 and sign the digest
/// with the key-path key. Returns `false` on any decode failure.
pub fn verify_taproot_schnorr(
    message: &str,
    signature_hex_or_b64: &str,
    internal_key: &XOnlyPublicKey,
) -> bool {
    let Some(sig_bytes) = decode_schnorr_signature(signature_hex_or_b64) else {
        return false;
    };
    let Ok(sig) = schnorr::Signature::from_slice(&sig_bytes) else {
        return false;
    };
    let digest = sha256::Hash::hash(message.as_bytes());
    let msg = Message::from_digest(digest.to_byte_array());
    Secp256k1::verification_only()
        .verify_schnorr(&sig, &msg, internal_key)
        .is_ok()
}

/// Schnorr signatures arrive hex-encoded from most Ordinals wallets, but a
/// few hand back base64; accept both.
fn decode_schnorr_signature(signature: &str) -> Option<Vec<u8>> {
    let trimmed = signature.trim();
    let cleaned = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if let Ok(bytes) = hex::decode(cleaned) {
        if bytes.len() == 64 {
            return Some(bytes);
        }
    }
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(cleaned)
        .ok()
        .filter(|b| b.len() == 64)
}
