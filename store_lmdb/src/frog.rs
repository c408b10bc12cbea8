//! LMDB implementation of FrogStore. Keys are big-endian frog ids.

use froglink_store::frog::{FrogRecord, FrogStore};
use froglink_store::StoreError;
use froglink_types::FrogId;

use crate::{LmdbError, LmdbStore};

impl FrogStore for LmdbStore {
    fn put_frog(&self, record: &FrogRecord) -> Result<(), StoreError> {
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.frogs_db
            .put(&mut wtxn, &record.frog_id.value().to_be_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_frog(&self, frog_id: FrogId) -> Result<Option<FrogRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .frogs_db
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

    fn frog_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.frogs_db.len(&rtxn).map_err(LmdbError::from)?)
    }
}
