//! Generic wallet-connect signature verification.
//!
//! Unlike the link flow, the connect flow is not gated on address kind: the
//! wallet picks its own signing scheme. Verification therefore runs two
//! passes in a fixed order:
//!
//! 1. standard legacy message verification (ECDSA recovery — covers P2PKH
//!    and recoverable signatures from some P2WPKH wallets);
//! 2. BIP-322 simple verification after normalization (covers P2WPKH,
//!    P2SH-P2WPKH, and Taproot key-path signatures uniformly).

use base64::Engine;
use froglink_types::BitcoinNetwork;

use crate::normalize::{hex_to_base64, normalize_signature};
use crate::parse_address;
use crate::segwit::verify_recoverable;

/// Verify a connect-flow signature against any supported address form.
/// Returns `false` rather than erroring: the caller only distinguishes
/// valid from invalid here.
pub fn verify_connect_signature(
    message: &str,
    address: &str,
    signature: &str,
    network: BitcoinNetwork,
) -> bool {
    if verify_legacy(message, address, signature, network) {
        return true;
    }
    verify_bip322(message, address, signature)
}

/// First pass: treat the signature as a base64 65-byte recoverable
/// signature over the standard signed-message digest.
fn verify_legacy(message: &str, address: &str, signature: &str, network: BitcoinNetwork) -> bool {
    let Ok(addr) = parse_address(address, network) else {
        return false;
    };
    let Ok(sig_bytes) =
        base64::engine::general_purpose::STANDARD.decode(signature.trim())
    else {
        return false;
    };
    verify_recoverable(message, &addr, &sig_bytes)
}

/// Second pass: normalize the signature (prefix/whitespace/base64url/hex)
/// and run BIP-322 simple verification.
fn verify_bip322(message: &str, address: &str, signature: &str) -> bool {
    let normalized = normalize_signature(signature);
    let sig_b64 = hex_to_base64(&normalized);
    bip322::verify_simple_encoded(address, message, &sig_b64).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::hashes::Hash;
    use bitcoin::secp256k1::{Message, Secp256k1, SecretKey};
    use bitcoin::sign_message::{signed_msg_hash, MessageSignature};
    use bitcoin::{Address, Network};

    fn p2pkh_wallet(seed: u8) -> (SecretKey, Address) {
        let secp = Secp256k1::new();
        let sk = SecretKey::from_slice(&[seed; 32]).unwrap();
        let pk = bitcoin::key::PublicKey::new(sk.public_key(&secp));
        let addr = Address::p2pkh(pk.pubkey_hash(), Network::Bitcoin);
        (sk, addr)
    }

    fn sign_legacy(message: &str, sk: &SecretKey) -> String {
        let secp = Secp256k1::new();
        let msg_hash = signed_msg_hash(message);
        let msg = Message::from_digest(msg_hash.to_byte_array());
        let recsig = secp.sign_ecdsa_recoverable(&msg, sk);
        base64::engine::general_purpose::STANDARD
            .encode(MessageSignature::new(recsig, true).serialize())
    }

    #[test]
    fn legacy_p2pkh_roundtrip() {
        let (sk, addr) = p2pkh_wallet(51);
        let message = "Bitcoin Frogs Verification\nAddress: x\nNonce: 00ff\nTime: t";
        let sig = sign_legacy(message, &sk);
        assert!(verify_connect_signature(
            message,
            &addr.to_string(),
            &sig,
            BitcoinNetwork::Mainnet
        ));
    }

    #[test]
    fn legacy_rejects_tampered_message() {
        let (sk, addr) = p2pkh_wallet(52);
        let sig = sign_legacy("signed", &sk);
        assert!(!verify_connect_signature(
            "tampered",
            &addr.to_string(),
            &sig,
            BitcoinNetwork::Mainnet
        ));
    }

    #[test]
    fn whitespace_and_prefix_do_not_break_legacy_pass() {
        let (sk, addr) = p2pkh_wallet(53);
        let message = "robust to copy-paste";
        let sig = sign_legacy(message, &sk);
        let padded = format!("  {sig}\n");
        assert!(verify_connect_signature(
            message,
            &addr.to_string(),
            &padded,
            BitcoinNetwork::Mainnet
        ));
    }

    #[test]
    fn invalid_inputs_fail_without_panic() {
        for (addr, sig) in [
            ("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4", ""),
            ("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4", "not base64 !!!"),
            ("", "AAAA"),
            ("definitely-not-an-address", "AAAA"),
        ] {
            assert!(!verify_connect_signature(
                "msg",
                addr,
                sig,
                BitcoinNetwork::Mainnet
            ));
        }
    }

    #[test]
    fn hex_encoded_garbage_reaches_bip322_and_fails_cleanly() {
        // Even-length hex is converted to base64 for the BIP-322 pass; a
        // random payload must still verify as false, not panic.
        let (_, addr) = p2pkh_wallet(54);
        let junk_hex = "0x".to_string() + &"ab".repeat(65);
        assert!(!verify_connect_signature(
            "msg",
            &addr.to_string(),
            &junk_hex,
            BitcoinNetwork::Mainnet
        ));
    }
}
