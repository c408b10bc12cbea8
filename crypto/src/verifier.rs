//! Address-kind dispatch for link verification.

use froglink_types::{AddressKind, BitcoinNetwork, BtcAddress};

use crate::{segwit, taproot, CryptoError};

/// Verify the challenge signature for the link flow.
///
/// The address kind picks the scheme:
/// - `bc1q…`: standard signed-message ECDSA recovery (base64 or hex
///   signature);
/// - `bc1p…`: requires `pubkey_hex`; the derived key-path address must equal
///   the claimed one (a mismatch is its own error, not a bad signature),
///   then Schnorr over SHA-256 of the message;
/// - anything else is rejected as unsupported — the connect flow handles
///   legacy wallets.
pub fn verify_link_signature(
    message: &str,
    address: &BtcAddress,
    signature: &str,
    pubkey_hex: Option<&str>,
    network: BitcoinNetwork,
) -> Result<(), CryptoError> {
    match address.kind() {
        AddressKind::SegwitP2wpkh => {
            if segwit::verify_segwit_ecdsa(message, address.as_str(), signature, network) {
                Ok(())
            } else {
                Err(CryptoError::SignatureInvalid)
            }
        }
        AddressKind::Taproot => {
            let pubkey_hex = pubkey_hex.ok_or(CryptoError::PubkeyRequired)?;
            let internal_key = taproot::xonly_from_hex(pubkey_hex)?;
            let derived = taproot::taproot_address(&internal_key, network);
            if derived.to_string() != address.as_str().to_lowercase() {
                return Err(CryptoError::AddressPubkeyMismatch);
            }
            if taproot::verify_taproot_schnorr(message, signature, &internal_key) {
                Ok(())
            } else {
                Err(CryptoError::SignatureInvalid)
            }
        }
        AddressKind::Other => Err(CryptoError::UnsupportedAddressType),
    }
}
