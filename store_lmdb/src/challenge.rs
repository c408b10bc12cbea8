//! LMDB implementation of ChallengeStore. Keys are the nonce bytes, which
//! are globally unique by construction.

use froglink_store::challenge::{ChallengeRecord, ChallengeStore, ConsumeOutcome};
use froglink_store::StoreError;
use froglink_types::{BtcAddress, Nonce};

use crate::{LmdbError, LmdbStore};

impl ChallengeStore for LmdbStore {
    fn put_challenge(&self, record: &ChallengeRecord) -> Result<(), StoreError> {
        let key = record.nonce.as_str().as_bytes();
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        if self
            .challenges_db
            .get(&wtxn, key)
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Err(StoreError::Duplicate(record.nonce.to_string()));
        }
        self.challenges_db
            .put(&mut wtxn, key, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_challenge(&self, nonce: &Nonce) -> Result<Option<ChallengeRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .challenges_db
            .get(&rtxn, nonce.as_str().as_bytes())
            .map_err(LmdbError::from)?;
        match val {
            Some(bytes) => {
                let record = bincode::deserialize(bytes).map_err(LmdbError::from)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn consume_challenge(
        &self,
        nonce: &Nonce,
        address: &BtcAddress,
    ) -> Result<ConsumeOutcome, StoreError> {
        let key = nonce.as_str().as_bytes();
        // Read-modify-write inside a single write transaction. LMDB allows
        // one writer at a time, so the check-and-set cannot interleave.
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let mut record: ChallengeRecord = {
            let val = self
                .challenges_db
                .get(&wtxn, key)
                .map_err(LmdbError::from)?;
            match val {
                Some(bytes) => bincode::deserialize(bytes).map_err(LmdbError::from)?,
                None => return Ok(ConsumeOutcome::NotFound),
            }
        };
        if record.consumed {
            return Ok(ConsumeOutcome::AlreadyConsumed);
        }
        record.consumed = true;
        record.address = Some(address.clone());
        let bytes = bincode::serialize(&record).map_err(LmdbError::from)?;
        self.challenges_db
            .put(&mut wtxn, key, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(ConsumeOutcome::Consumed)
    }

    fn challenge_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.challenges_db.len(&rtxn).map_err(LmdbError::from)?)
    }
}
