//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::LmdbError;

/// Number of named databases the store creates.
const MAX_DBS: u32 = 10;

/// Wraps the LMDB environment and all database handles.
///
/// One instance is created at startup and shared behind an `Arc`; every
/// trait implementation in this crate lives on it so cross-table writes
/// can share a single transaction.
pub struct LmdbStore {
    pub(crate) env: Arc<Env>,
    pub(crate) frogs_db: Database<Bytes, Bytes>,
    pub(crate) challenges_db: Database<Bytes, Bytes>,
    pub(crate) sessions_db: Database<Bytes, Bytes>,
    pub(crate) links_db: Database<Bytes, Bytes>,
    pub(crate) froggy_index_db: Database<Bytes, Bytes>,
    pub(crate) inscription_index_db: Database<Bytes, Bytes>,
    pub(crate) claims_db: Database<Bytes, Bytes>,
    pub(crate) verifications_db: Database<Bytes, Bytes>,
}

impl LmdbStore {
    /// Open or create an LMDB environment at the given path.
    ///
    /// `map_size` is the maximum database size in bytes; LMDB reserves the
    /// address space up front but only allocates pages as needed.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)
            .map_err(|e| LmdbError::Heed(format!("create data dir: {e}")))?;

        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let frogs_db = env.create_database(&mut wtxn, Some("frogs"))?;
        let challenges_db = env.create_database(&mut wtxn, Some("challenges"))?;
        let sessions_db = env.create_database(&mut wtxn, Some("sessions"))?;
        let links_db = env.create_database(&mut wtxn, Some("links"))?;
        let froggy_index_db = env.create_database(&mut wtxn, Some("links_by_froggy"))?;
        let inscription_index_db =
            env.create_database(&mut wtxn, Some("links_by_inscription"))?;
        let claims_db = env.create_database(&mut wtxn, Some("claims"))?;
        let verifications_db = env.create_database(&mut wtxn, Some("verifications"))?;
        wtxn.commit()?;

        tracing::info!(path = %path.display(), "opened LMDB store");

        Ok(Self {
            env: Arc::new(env),
            frogs_db,
            challenges_db,
            sessions_db,
            links_db,
            froggy_index_db,
            inscription_index_db,
            claims_db,
            verifications_db,
        })
    }
}
