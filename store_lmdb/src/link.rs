//! LMDB implementation of LinkStore.
//!
//! `commit_link` is the only multi-table write in the system: the link row,
//! both uniqueness indexes, and the challenge consumption all go through
//! one write transaction, so a crash or a losing race leaves no partial
//! state behind.

use froglink_store::challenge::ChallengeRecord;
use froglink_store::link::{CommitOutcome, LinkRecord, LinkStore};
use froglink_store::StoreError;
use froglink_types::{FrogId, Nonce};

use crate::{LmdbError, LmdbStore};

impl LinkStore for LmdbStore {
    fn commit_link(&self, link: &LinkRecord, nonce: &Nonce) -> Result<CommitOutcome, StoreError> {
        let frog_key = link.frog_id.value().to_be_bytes();
        let froggy_key = link.froggy_id.value().to_be_bytes();
        let inscription_key = link.inscription_id.as_str().as_bytes();
        let nonce_key = nonce.as_str().as_bytes();

        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;

        // Conflict checks first; an early return drops the transaction,
        // which aborts it.
        if self
            .links_db
            .get(&wtxn, &frog_key)
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Ok(CommitOutcome::AlreadyLinked);
        }
        if self
            .froggy_index_db
            .get(&wtxn, &froggy_key)
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Ok(CommitOutcome::TargetInUse);
        }
        if self
            .inscription_index_db
            .get(&wtxn, inscription_key)
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Ok(CommitOutcome::AssetInUse);
        }

        let mut challenge: ChallengeRecord = {
            let val = self
                .challenges_db
                .get(&wtxn, nonce_key)
                .map_err(LmdbError::from)?;
            match val {
                Some(bytes) => bincode::deserialize(bytes).map_err(LmdbError::from)?,
                None => return Ok(CommitOutcome::NonceMissing),
            }
        };
        if challenge.consumed {
            return Ok(CommitOutcome::NonceConsumed);
        }

        let link_bytes = bincode::serialize(link).map_err(LmdbError::from)?;
        self.links_db
            .put(&mut wtxn, &frog_key, &link_bytes)
            .map_err(LmdbError::from)?;
        self.froggy_index_db
            .put(&mut wtxn, &froggy_key, &frog_key)
            .map_err(LmdbError::from)?;
        self.inscription_index_db
            .put(&mut wtxn, inscription_key, &frog_key)
            .map_err(LmdbError::from)?;

        challenge.consumed = true;
        challenge.address = Some(link.owner_address.clone());
        let challenge_bytes = bincode::serialize(&challenge).map_err(LmdbError::from)?;
        self.challenges_db
            .put(&mut wtxn, nonce_key, &challenge_bytes)
            .map_err(LmdbError::from)?;

        wtxn.commit().map_err(LmdbError::from)?;
        Ok(CommitOutcome::Committed)
    }

    fn get_link(&self, frog_id: FrogId) -> Result<Option<LinkRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .links_db
            .get(&rtxn, &frog_id.value().to_be_bytes())
            .map_err(LmdbError::from)?;
        match val {
            Some(bytes) => {
                let record = bincode::deserialize(bytes).map_err(LmdbError::from)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn link_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.links_db.len(&rtxn).map_err(LmdbError::from)?)
    }
}
