//! LMDB implementation of SessionStore.
//!
//! Key format: `address_bytes ++ b":" ++ nonce_bytes`. Addresses never
//! contain `:`, so the composite key is unambiguous.

use froglink_store::challenge::ConsumeOutcome;
use froglink_store::session::{SessionRecord, SessionStatus, SessionStore};
use froglink_store::StoreError;
use froglink_types::{BtcAddress, Nonce, Timestamp};

use crate::{LmdbError, LmdbStore};

/// Build the composite key `address ++ ":" ++ nonce`.
fn session_key(address: &BtcAddress, nonce: &Nonce) -> Vec<u8> {
    let a = address.as_str().as_bytes();
    let n = nonce.as_str().as_bytes();
    let mut key = Vec::with_capacity(a.len() + 1 + n.len());
    key.extend_from_slice(a);
    key.push(b':');
    key.extend_from_slice(n);
    key
}

impl SessionStore for LmdbStore {
    fn put_session(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let key = session_key(&record.address, &record.nonce);
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.sessions_db
            .put(&mut wtxn, &key, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_session(
        &self,
        address: &BtcAddress,
        nonce: &Nonce,
    ) -> Result<Option<SessionRecord>, StoreError> {
        let key = session_key(address, nonce);
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .sessions_db
            .get(&rtxn, &key)
            .map_err(LmdbError::from)?;
        match val {
            Some(bytes) => {
                let record = bincode::deserialize(bytes).map_err(LmdbError::from)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn use_session(
        &self,
        address: &BtcAddress,
        nonce: &Nonce,
        used_at: Timestamp,
    ) -> Result<ConsumeOutcome, StoreError> {
        let key = session_key(address, nonce);
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let mut record: SessionRecord = {
            let val = self
                .sessions_db
                .get(&wtxn, &key)
                .map_err(LmdbError::from)?;
            match val {
                Some(bytes) => bincode::deserialize(bytes).map_err(LmdbError::from)?,
                None => return Ok(ConsumeOutcome::NotFound),
            }
        };
        if record.status == SessionStatus::Used {
            return Ok(ConsumeOutcome::AlreadyConsumed);
        }
        record.status = SessionStatus::Used;
        record.used_at = Some(used_at);
        let bytes = bincode::serialize(&record).map_err(LmdbError::from)?;
        self.sessions_db
            .put(&mut wtxn, &key, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(ConsumeOutcome::Consumed)
    }
}
