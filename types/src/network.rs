//! Bitcoin network selector.

use serde::{Deserialize, Serialize};

/// Which Bitcoin network addresses and signatures are checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BitcoinNetwork {
    /// Bitcoin mainnet (`bc1…` addresses).
    Mainnet,
    /// Bitcoin testnet (`tb1…` addresses).
    Testnet,
}

impl BitcoinNetwork {
    /// Bech32 human-readable prefix for this network.
    pub fn bech32_hrp(&self) -> &'static str {
        match self {
            Self::Mainnet => "bc",
            Self::Testnet => "tb",
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl Default for BitcoinNetwork {
    fn default() -> Self {
        Self::Mainnet
    }
}
