//! Bitcoin signature verification for the Froglink service.
//!
//! Three verification paths, selected by address kind:
//! - Segwit P2WPKH: standard signed-message ECDSA with public key recovery.
//! - Taproot: BIP-341 key-path address derivation plus Schnorr over
//!   SHA-256 of the message bytes.
//! - Generic wallet-connect fallback: legacy recoverable verification,
//!   then BIP-322 simple verification after signature normalization.
//!
//! Nothing in this crate panics on malformed input: every parse or
//! verification failure becomes `false` or a typed [`CryptoError`].

pub mod generic;
pub mod normalize;
pub mod segwit;
pub mod taproot;
pub mod verifier;

use froglink_types::BitcoinNetwork;
use thiserror::Error;

pub use generic::verify_connect_signature;
pub use normalize::{coalesce_signature, normalize_signature};
pub use taproot::{taproot_address, verify_taproot_schnorr, xonly_from_hex};
pub use verifier::verify_link_signature;

/// Errors distinguished by the link-verification dispatch.
///
/// `SignatureInvalid` means the request was well-formed but the
/// cryptographic check failed; the other variants are input problems the
/// caller can act on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid public key")]
    InvalidPubkey,

    #[error("taproot verification requires an explicit public key")]
    PubkeyRequired,

    #[error("address does not match the supplied public key")]
    AddressPubkeyMismatch,

    #[error("unsupported address type")]
    UnsupportedAddressType,

    #[error("invalid signature")]
    SignatureInvalid,

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Map the service network selector to the rust-bitcoin network.
pub fn rust_network(network: BitcoinNetwork) -> bitcoin::Network {
    match network {
        BitcoinNetwork::Mainnet => bitcoin::Network::Bitcoin,
        BitcoinNetwork::Testnet => bitcoin::Network::Testnet,
    }
}

/// Parse and network-check an address string.
pub(crate) fn parse_address(
    addr: &str,
    network: BitcoinNetwork,
) -> Result<bitcoin::Address, CryptoError> {
    addr.parse::<bitcoin::Address<bitcoin::address::NetworkUnchecked>>()
        .map_err(|_| CryptoError::InvalidAddress(addr.to_string()))?
        .require_network(rust_network(network))
        .map_err(|_| CryptoError::InvalidAddress(addr.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_mapping() {
        assert_eq!(rust_network(BitcoinNetwork::Mainnet), bitcoin::Network::Bitcoin);
        assert_eq!(rust_network(BitcoinNetwork::Testnet), bitcoin::Network::Testnet);
    }

    #[test]
    fn parse_address_rejects_wrong_network() {
        // Genesis-era P2PKH address is mainnet; asking for testnet must fail.
        let result = parse_address("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", BitcoinNetwork::Testnet);
        assert!(result.is_err());
    }

    #[test]
    fn parse_address_rejects_garbage() {
        assert!(parse_address("not-an-address", BitcoinNetwork::Mainnet).is_err());
        assert!(parse_address("", BitcoinNetwork::Mainnet).is_err());
    }
}
