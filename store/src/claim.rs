//! Claim storage trait — coarse per-number ownership reservations.

use crate::StoreError;
use froglink_types::{BtcAddress, Timestamp};
use serde::{Deserialize, Serialize};

/// A claim of one frog number by one wallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub frog_number: u32,
    pub owner_address: BtcAddress,
    pub created_at: Timestamp,
}

/// Result of a batch claim: the numbers already held by a different owner,
/// sorted ascending. Empty means the whole batch committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimBatchOutcome {
    pub conflicts: Vec<u32>,
}

impl ClaimBatchOutcome {
    pub fn committed(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Trait for claim storage.
///
/// Batch policy: all-or-nothing. If any requested number is claimed by a
/// different address, no row is written and the full conflict list is
/// returned. Numbers already claimed by the same address are idempotent,
/// not conflicts.
pub trait ClaimStore {
    /// Claim a batch of frog numbers for one owner.
    fn claim_batch(
        &self,
        owner: &BtcAddress,
        numbers: &[u32],
        now: Timestamp,
    ) -> Result<ClaimBatchOutcome, StoreError>;

    /// Look up the claim for a number.
    fn get_claim(&self, frog_number: u32) -> Result<Option<ClaimRecord>, StoreError>;

    /// Number of claimed frog numbers.
    fn claim_count(&self) -> Result<u64, StoreError>;
}
