//! Wallet-connect session storage trait.

use crate::challenge::ConsumeOutcome;
use crate::StoreError;
use froglink_types::{BtcAddress, Nonce, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Pending,
    Used,
}

/// A lightweight connect-flow challenge, keyed by `(address, nonce)`.
/// Same single-use invariant as [`crate::ChallengeRecord`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub address: BtcAddress,
    pub nonce: Nonce,
    pub status: SessionStatus,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub used_at: Option<Timestamp>,
}

/// Trait for connect-session storage.
pub trait SessionStore {
    /// Persist a freshly created pending session.
    fn put_session(&self, record: &SessionRecord) -> Result<(), StoreError>;

    /// Look up a session by address and nonce.
    fn get_session(
        &self,
        address: &BtcAddress,
        nonce: &Nonce,
    ) -> Result<Option<SessionRecord>, StoreError>;

    /// Atomically mark a pending session used. Same linearizability
    /// contract as [`crate::ChallengeStore::consume_challenge`].
    fn use_session(
        &self,
        address: &BtcAddress,
        nonce: &Nonce,
        used_at: Timestamp,
    ) -> Result<ConsumeOutcome, StoreError>;
}
