//! Segwit P2WPKH signed-message verification via ECDSA public key recovery.

use base64::Engine;
use bitcoin::secp256k1::Secp256k1;
use bitcoin::sign_message::{signed_msg_hash, MessageSignature};
use froglink_types::BitcoinNetwork;

use crate::parse_address;

/// Verify a standard Bitcoin signed message against a `bc1q…` address.
///
/// Wallets emit the 65-byte recoverable signature either base64- or
/// hex-encoded; both encodings are attempted before declaring failure.
/// Returns `false` for any decode, recovery, or address mismatch.
pub fn verify_segwit_ecdsa(
    message: &str,
    address: &str,
    signature: &str,
    network: BitcoinNetwork,
) -> bool {
    let Ok(addr) = parse_address(address, network) else {
        return false;
    };

    let trimmed = signature.trim();
    if let Ok(bytes) = base64::engine::general_purpose::STANDARD.decode(trimmed) {
        if verify_recoverable(message, &addr, &bytes) {
            return true;
        }
    }
    let cleaned = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if let Ok(bytes) = hex::decode(cleaned) {
        if verify_recoverable(message, &addr, &bytes) {
            return true;
        }
    }
    false
}

/// Recover the signing key from a 65-byte recoverable signature over the
/// standard signed-message digest and check it controls `addr`.
pub(crate) fn verify_recoverable(message: &str, addr: &bitcoin::Address, sig_bytes: &[u8]) -> bool {
    let Ok(sig) = MessageSignature::from_slice(sig_bytes) else {
        return false;
    };
    let secp = Secp256k1::new();
    let msg_hash = signed_msg_hash(message);
    let Ok(pubkey) = sig.recover_pubkey(&secp, msg_hash) else {
        return false;
    };
    addr.is_related_to_pubkey(&pubkey)
}
