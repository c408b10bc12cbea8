//! LMDB implementation of ClaimStore.
//!
//! Batch semantics are all-or-nothing: conflicts abort the transaction
//! before any row is written.

use froglink_store::claim::{ClaimBatchOutcome, ClaimRecord, ClaimStore};
use froglink_store::StoreError;
use froglink_types::{BtcAddress, Timestamp};

use crate::{LmdbError, LmdbStore};

impl ClaimStore for LmdbStore {
    fn claim_batch(
        &self,
        owner: &BtcAddress,
        numbers: &[u32],
        now: Timestamp,
    ) -> Result<ClaimBatchOutcome, StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;

        let mut conflicts = Vec::new();
        for &n in numbers {
            let existing = self
                .claims_db
                .get(&wtxn, &n.to_be_bytes())
                .map_err(LmdbError::from)?;
            if let Some(bytes) = existing {
                let record: ClaimRecord =
                    bincode::deserialize(bytes).map_err(LmdbError::from)?;
                if record.owner_address != *owner {
                    conflicts.push(n);
                }
            }
        }
        if !conflicts.is_empty() {
            conflicts.sort_unstable();
            conflicts.dedup();
            return Ok(ClaimBatchOutcome { conflicts });
        }

        for &n in numbers {
            let already_ours = self
                .claims_db
                .get(&wtxn, &n.to_be_bytes())
                .map_err(LmdbError::from)?
                .is_some();
            if already_ours {
                continue;
            }
            let record = ClaimRecord {
                frog_number: n,
                owner_address: owner.clone(),
                created_at: now,
            };
            let bytes = bincode::serialize(&record).map_err(LmdbError::from)?;
            self.claims_db
                .put(&mut wtxn, &n.to_be_bytes(), &bytes)
                .map_err(LmdbError::from)?;
        }

        wtxn.commit().map_err(LmdbError::from)?;
        Ok(ClaimBatchOutcome { conflicts: Vec::new() })
    }

    fn get_claim(&self, frog_number: u32) -> Result<Option<ClaimRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .claims_db
            .get(&rtxn, &frog_number.to_be_bytes())
            .map_err(LmdbError::from)?;
        match val {
            Some(bytes) => {
                let record = bincode::deserialize(bytes).map_err(LmdbError::from)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn claim_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.claims_db.len(&rtxn).map_err(LmdbError::from)?)
    }
}
