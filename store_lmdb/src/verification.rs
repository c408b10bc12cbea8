//! LMDB implementation of VerificationStore.
//!
//! Receipts are stored as an append-only vector per address. Volumes are
//! small (one entry per connect or confirm), so read-modify-write of the
//! whole vector is fine.

use froglink_store::verification::{VerificationRecord, VerificationStore};
use froglink_store::StoreError;
use froglink_types::BtcAddress;

use crate::{LmdbError, LmdbStore};

impl VerificationStore for LmdbStore {
    fn put_verification(&self, record: &VerificationRecord) -> Result<(), StoreError> {
        let key = record.address.as_str().as_bytes();
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let mut records: Vec<VerificationRecord> = {
            let val = self
                .verifications_db
                .get(&wtxn, key)
                .map_err(LmdbError::from)?;
            match val {
                Some(bytes) => bincode::deserialize(bytes).map_err(LmdbError::from)?,
                None => Vec::new(),
            }
        };
        records.push(record.clone());
        let bytes = bincode::serialize(&records).map_err(LmdbError::from)?;
        self.verifications_db
            .put(&mut wtxn, key, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn latest_verification(
        &self,
        address: &BtcAddress,
    ) -> Result<Option<VerificationRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .verifications_db
            .get(&rtxn, address.as_str().as_bytes())
            .map_err(LmdbError::from)?;
        match val {
            Some(bytes) => {
                let records: Vec<VerificationRecord> =
                    bincode::deserialize(bytes).map_err(LmdbError::from)?;
                Ok(records.into_iter().last())
            }
            None => Ok(None),
        }
    }
}
