//! Bitcoin address wrapper and address-kind classification.

use crate::network::BitcoinNetwork;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The address schemes the verifier distinguishes between.
///
/// Classification is by bech32 prefix, the same way wallets advertise it:
/// witness v1 (`bc1p`/`tb1p`) is Taproot, witness v0 with a 20-byte program
/// (`bc1q`/`tb1q`) is P2WPKH. Everything else (legacy base58, P2SH, longer
/// witness programs) falls into `Other` and is only accepted by the
/// generic wallet-connect flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressKind {
    Taproot,
    SegwitP2wpkh,
    Other,
}

/// A caller-supplied Bitcoin address, kept as the original string.
///
/// The crypto layer re-parses it with full checksum validation; this type
/// only carries it around and answers cheap classification queries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BtcAddress(String);

impl BtcAddress {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify by bech32 prefix (case-insensitive, either network).
    pub fn kind(&self) -> AddressKind {
        let lower = self.0.to_lowercase();
        if lower.starts_with("bc1p") || lower.starts_with("tb1p") {
            AddressKind::Taproot
        } else if lower.starts_with("bc1q") || lower.starts_with("tb1q") {
            AddressKind::SegwitP2wpkh
        } else {
            AddressKind::Other
        }
    }

    /// Whether this is a bech32 address for the given network.
    pub fn matches_network(&self, network: BitcoinNetwork) -> bool {
        let lower = self.0.to_lowercase();
        lower.starts_with(&format!("{}1", network.bech32_hrp()))
    }

    /// Shallow shape check used by input validation: bech32 prefix plus
    /// charset. Full checksum validation happens in the crypto layer.
    pub fn is_plausible_bech32(&self) -> bool {
        let lower = self.0.to_lowercase();
        let rest = match lower
            .strip_prefix("bc1")
            .or_else(|| lower.strip_prefix("tb1"))
        {
            Some(rest) => rest,
            None => return false,
        };
        !rest.is_empty()
            && rest
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    }
}

impl fmt::Display for BtcAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BtcAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
