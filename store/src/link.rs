//! Link storage trait — the `frog_links` table and its uniqueness indexes.

use crate::StoreError;
use froglink_types::{BtcAddress, FrogId, FroggyId, InscriptionId, Nonce, Timestamp};
use serde::{Deserialize, Serialize};

/// How the ownership proof was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMethod {
    Message,
    Psbt,
}

/// A verified frog ↔ froggy ↔ inscription link.
///
/// `frog_id` is the primary key; `froggy_id` and `inscription_id` each
/// carry a uniqueness constraint, so the three ids form an injective
/// mapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub frog_id: FrogId,
    pub froggy_id: FroggyId,
    pub inscription_id: InscriptionId,
    pub owner_address: BtcAddress,
    pub signature: String,
    pub method: LinkMethod,
    pub created_at: Timestamp,
}

/// Result of an atomic link commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Link row inserted and challenge consumed, atomically.
    Committed,
    /// A link for this frog already exists; nothing was written.
    AlreadyLinked,
    /// The froggy id is already linked to a different frog.
    TargetInUse,
    /// The inscription is already linked to a different frog.
    AssetInUse,
    /// The originating challenge nonce does not exist.
    NonceMissing,
    /// The originating challenge was already consumed (replay).
    NonceConsumed,
}

/// Trait for link storage.
pub trait LinkStore {
    /// Atomically: verify no conflicting link exists, insert the link, and
    /// consume the originating challenge (recording the owner address).
    ///
    /// All three steps commit or roll back together — a link without its
    /// consumed challenge (or vice versa) must be unreachable even under
    /// concurrent requests for the same nonce or frog.
    fn commit_link(&self, link: &LinkRecord, nonce: &Nonce) -> Result<CommitOutcome, StoreError>;

    /// Look up the link for a frog.
    fn get_link(&self, frog_id: FrogId) -> Result<Option<LinkRecord>, StoreError>;

    /// Number of committed links.
    fn link_count(&self) -> Result<u64, StoreError>;
}
