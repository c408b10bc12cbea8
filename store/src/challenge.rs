//! Challenge storage trait — the `wallet_challenges` table.

use crate::StoreError;
use froglink_types::{BtcAddress, FrogId, InscriptionId, Nonce, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A one-time link challenge, keyed by its globally unique nonce.
///
/// Rows are never deleted (audit trail). The only mutation is the
/// pending→consumed transition, which happens exactly once and records the
/// address that proved the signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRecord {
    pub id: Uuid,
    pub frog_id: FrogId,
    /// Unset until consumption; then the verified signer address.
    pub address: Option<BtcAddress>,
    pub inscription_id: InscriptionId,
    pub nonce: Nonce,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
    pub consumed: bool,
}

/// Result of an atomic consume attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// This caller won the transition.
    Consumed,
    /// Some earlier caller already consumed the nonce (replay).
    AlreadyConsumed,
    /// No challenge with this nonce exists.
    NotFound,
}

/// Trait for challenge storage.
pub trait ChallengeStore {
    /// Persist a freshly issued pending challenge.
    /// Fails with [`StoreError::Duplicate`] if the nonce already exists.
    fn put_challenge(&self, record: &ChallengeRecord) -> Result<(), StoreError>;

    /// Look up a challenge by nonce.
    fn get_challenge(&self, nonce: &Nonce) -> Result<Option<ChallengeRecord>, StoreError>;

    /// Atomically transition a pending challenge to consumed, recording the
    /// verified address. This is the serialization point for replay
    /// defense: under concurrent calls for one nonce, exactly one caller
    /// gets [`ConsumeOutcome::Consumed`].
    fn consume_challenge(
        &self,
        nonce: &Nonce,
        address: &BtcAddress,
    ) -> Result<ConsumeOutcome, StoreError>;

    /// Number of stored challenges (consumed or not).
    fn challenge_count(&self) -> Result<u64, StoreError>;
}
