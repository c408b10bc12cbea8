//! In-memory backend for local development and testing.
//!
//! One mutex guards every table, which makes the multi-table operations
//! (`commit_link`) and the conditional updates (`consume_challenge`,
//! `use_session`, `claim_batch`) trivially atomic — the same guarantees the
//! LMDB backend gets from its write transactions.

use std::collections::HashMap;
use std::sync::Mutex;

use froglink_types::{BtcAddress, FrogId, Nonce, Timestamp};

use crate::challenge::{ChallengeRecord, ChallengeStore, ConsumeOutcome};
use crate::claim::{ClaimBatchOutcome, ClaimRecord, ClaimStore};
use crate::frog::{FrogRecord, FrogStore};
use crate::link::{CommitOutcome, LinkRecord, LinkStore};
use crate::session::{SessionRecord, SessionStatus, SessionStore};
use crate::verification::{VerificationRecord, VerificationStore};
use crate::StoreError;

#[derive(Default)]
struct Inner {
    frogs: HashMap<u32, FrogRecord>,
    /// Keyed by nonce (globally unique).
    challenges: HashMap<String, ChallengeRecord>,
    /// Keyed by `address:nonce`.
    sessions: HashMap<String, SessionRecord>,
    /// Keyed by frog id.
    links: HashMap<u32, LinkRecord>,
    /// Uniqueness indexes mirroring the durable backend's.
    froggy_index: HashMap<u32, u32>,
    inscription_index: HashMap<String, u32>,
    /// Keyed by frog number.
    claims: HashMap<u32, ClaimRecord>,
    /// Receipts per address, append order preserved.
    verifications: HashMap<String, Vec<VerificationRecord>>,
}

/// Thread-safe in-memory store.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn session_key(address: &BtcAddress, nonce: &Nonce) -> String {
    format!("{}:{}", address.as_str(), nonce.as_str())
}

impl FrogStore for MemoryStore {
    fn put_frog(&self, record: &FrogRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.frogs.insert(record.frog_id.value(), record.clone());
        Ok(())
    }

    fn get_frog(&self, frog_id: FrogId) -> Result<Option<FrogRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.frogs.get(&frog_id.value()).cloned())
    }

    fn frog_count(&self) -> Result<u64, StoreError> {
        Ok(self.inner.lock().unwrap().frogs.len() as u64)
    }
}

impl ChallengeStore for MemoryStore {
    fn put_challenge(&self, record: &ChallengeRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.challenges.contains_key(record.nonce.as_str()) {
            return Err(StoreError::Duplicate(record.nonce.to_string()));
        }
        inner
            .challenges
            .insert(record.nonce.as_str().to_string(), record.clone());
        Ok(())
    }

    fn get_challenge(&self, nonce: &Nonce) -> Result<Option<ChallengeRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.challenges.get(nonce.as_str()).cloned())
    }

    fn consume_challenge(
        &self,
        nonce: &Nonce,
        address: &BtcAddress,
    ) -> Result<ConsumeOutcome, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.challenges.get_mut(nonce.as_str()) {
            None => Ok(ConsumeOutcome::NotFound),
            Some(ch) if ch.consumed => Ok(ConsumeOutcome::AlreadyConsumed),
            Some(ch) => {
                ch.consumed = true;
                ch.address = Some(address.clone());
                Ok(ConsumeOutcome::Consumed)
            }
        }
    }

    fn challenge_count(&self) -> Result<u64, StoreError> {
        Ok(self.inner.lock().unwrap().challenges.len() as u64)
    }
}

impl SessionStore for MemoryStore {
    fn put_session(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .sessions
            .insert(session_key(&record.address, &record.nonce), record.clone());
        Ok(())
    }

    fn get_session(
        &self,
        address: &BtcAddress,
        nonce: &Nonce,
    ) -> Result<Option<SessionRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.sessions.get(&session_key(address, nonce)).cloned())
    }

    fn use_session(
        &self,
        address: &BtcAddress,
        nonce: &Nonce,
        used_at: Timestamp,
    ) -> Result<ConsumeOutcome, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.sessions.get_mut(&session_key(address, nonce)) {
            None => Ok(ConsumeOutcome::NotFound),
            Some(s) if s.status == SessionStatus::Used => Ok(ConsumeOutcome::AlreadyConsumed),
            Some(s) => {
                s.status = SessionStatus::Used;
                s.used_at = Some(used_at);
                Ok(ConsumeOutcome::Consumed)
            }
        }
    }
}

impl LinkStore for MemoryStore {
    fn commit_link(&self, link: &LinkRecord, nonce: &Nonce) -> Result<CommitOutcome, StoreError> {
        let mut inner = self.inner.lock().unwrap();

        if inner.links.contains_key(&link.frog_id.value()) {
            return Ok(CommitOutcome::AlreadyLinked);
        }
        if inner.froggy_index.contains_key(&link.froggy_id.value()) {
            return Ok(CommitOutcome::TargetInUse);
        }
        if inner
            .inscription_index
            .contains_key(link.inscription_id.as_str())
        {
            return Ok(CommitOutcome::AssetInUse);
        }
        match inner.challenges.get(nonce.as_str()) {
            None => return Ok(CommitOutcome::NonceMissing),
            Some(ch) if ch.consumed => return Ok(CommitOutcome::NonceConsumed),
            Some(_) => {}
        }

        inner.links.insert(link.frog_id.value(), link.clone());
        inner
            .froggy_index
            .insert(link.froggy_id.value(), link.frog_id.value());
        inner
            .inscription_index
            .insert(link.inscription_id.as_str().to_string(), link.frog_id.value());
        let ch = inner
            .challenges
            .get_mut(nonce.as_str())
            .expect("challenge checked above");
        ch.consumed = true;
        ch.address = Some(link.owner_address.clone());
        Ok(CommitOutcome::Committed)
    }

    fn get_link(&self, frog_id: FrogId) -> Result<Option<LinkRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.links.get(&frog_id.value()).cloned())
    }

    fn link_count(&self) -> Result<u64, StoreError> {
        Ok(self.inner.lock().unwrap().links.len() as u64)
    }
}

impl ClaimStore for MemoryStore {
    fn claim_batch(
        &self,
        owner: &BtcAddress,
        numbers: &[u32],
        now: Timestamp,
    ) -> Result<ClaimBatchOutcome, StoreError> {
        let mut inner = self.inner.lock().unwrap();

        let mut conflicts: Vec<u32> = numbers
            .iter()
            .copied()
            .filter(|n| {
                inner
                    .claims
                    .get(n)
                    .is_some_and(|c| c.owner_address != *owner)
            })
            .collect();
        conflicts.sort_unstable();
        conflicts.dedup();
        if !conflicts.is_empty() {
            return Ok(ClaimBatchOutcome { conflicts });
        }

        for &n in numbers {
            inner.claims.entry(n).or_insert_with(|| ClaimRecord {
                frog_number: n,
                owner_address: owner.clone(),
                created_at: now,
            });
        }
        Ok(ClaimBatchOutcome { conflicts: Vec::new() })
    }

    fn get_claim(&self, frog_number: u32) -> Result<Option<ClaimRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.claims.get(&frog_number).cloned())
    }

    fn claim_count(&self) -> Result<u64, StoreError> {
        Ok(self.inner.lock().unwrap().claims.len() as u64)
    }
}

impl VerificationStore for MemoryStore {
    fn put_verification(&self, record: &VerificationRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .verifications
            .entry(record.address.as_str().to_string())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    fn latest_verification(
        &self,
        address: &BtcAddress,
    ) -> Result<Option<VerificationRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .verifications
            .get(address.as_str())
            .and_then(|v| v.last().cloned()))
    }
}
