//! Frog registry storage trait — the `frogs` table.

use crate::StoreError;
use froglink_types::{FrogId, InscriptionId};
use serde::{Deserialize, Serialize};

/// One frog of the legacy collection and its inscription.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrogRecord {
    pub frog_id: FrogId,
    pub inscription_id: InscriptionId,
}

/// Trait for the frog registry. Populated from a seed file at startup;
/// challenge issuance consults it to reject frog/inscription mismatches.
pub trait FrogStore {
    /// Insert or replace a frog entry.
    fn put_frog(&self, record: &FrogRecord) -> Result<(), StoreError>;

    /// Look up a frog by id.
    fn get_frog(&self, frog_id: FrogId) -> Result<Option<FrogRecord>, StoreError>;

    /// Number of registered frogs.
    fn frog_count(&self) -> Result<u64, StoreError>;
}
