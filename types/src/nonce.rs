//! Single-use challenge nonce.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A hex-encoded random nonce binding a signature to one challenge.
///
/// Issued nonces are 16 random bytes, so 32 lowercase hex characters, and
/// globally unique. The type also carries caller-supplied nonces, which are
/// validated with [`Nonce::is_well_formed`] before any store lookup.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nonce(String);

impl Nonce {
    /// Minimum accepted length for caller-supplied nonces (hex chars).
    pub const MIN_LEN: usize = 8;

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase hex of at least [`Nonce::MIN_LEN`] characters.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() >= Self::MIN_LEN
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Nonce {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
