//! Identifiers for frogs, froggys, and inscriptions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a frog in the legacy collection (1-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrogId(pub u32);

impl FrogId {
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for FrogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a froggy in the successor collection.
///
/// The frog→froggy mapping is deterministic and injective; `frog_links`
/// enforces uniqueness on both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FroggyId(pub u32);

impl FroggyId {
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for FroggyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An Ordinals inscription id: `<txid>i<index>`, e.g. `4b2c…91fi0`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InscriptionId(String);

impl InscriptionId {
    /// Minimum plausible length; real ids are a 64-char txid + `i` + index.
    const MIN_LEN: usize = 4;

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Well-formedness check used by input validation: long enough and
    /// containing the `i` separator.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() >= Self::MIN_LEN && self.0.contains('i')
    }
}

impl fmt::Display for InscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for InscriptionId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
