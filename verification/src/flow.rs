//! End-to-end verification flows.
//!
//! One [`VerificationService`] instance is constructed at startup with a
//! store backend and an ownership oracle, then shared across request
//! handlers. Signature checks are pure CPU; the service only suspends on
//! the oracle call. All replay defense lives in the store's atomic
//! `consume`/`commit` operations, never in read-then-write sequences here.

use std::sync::Arc;

use froglink_crypto::{coalesce_signature, verify_connect_signature, verify_link_signature};
use froglink_indexer::OwnershipOracle;
use froglink_store::link::{CommitOutcome, LinkMethod, LinkRecord};
use froglink_store::{
    ChallengeRecord, ChallengeStore, ClaimStore, ConsumeOutcome, FrogStore, LinkStore,
    SessionRecord, SessionStatus, SessionStore, Store, VerificationRecord, VerificationStatus,
    VerificationStore,
};
use froglink_types::{BitcoinNetwork, BtcAddress, FrogId, FroggyId, InscriptionId, Nonce, Timestamp};
use uuid::Uuid;

use crate::error::VerifyError;
use crate::map::map_froggy_id;
use crate::message::{build_connect_message, build_link_challenge, extract_nonce};
use crate::nonce::generate_nonce;

/// Tunables for the verification flows.
#[derive(Clone, Debug)]
pub struct VerificationParams {
    pub network: BitcoinNetwork,
    /// Site identity baked into every challenge (domain separation).
    pub site_domain: String,
    /// Challenge and session lifetime in seconds.
    pub challenge_ttl_secs: u64,
}

impl Default for VerificationParams {
    fn default() -> Self {
        Self {
            network: BitcoinNetwork::Mainnet,
            site_domain: "bitcoinfrogs.art".to_string(),
            challenge_ttl_secs: 600,
        }
    }
}

/// A freshly issued link challenge.
#[derive(Clone, Debug)]
pub struct IssuedChallenge {
    pub challenge: String,
    pub nonce: Nonce,
}

/// A freshly started connect session.
#[derive(Clone, Debug)]
pub struct StartedSession {
    pub nonce: Nonce,
    pub message: String,
}

/// Counters for the status endpoint.
#[derive(Clone, Copy, Debug)]
pub struct StatusSummary {
    pub links: u64,
    pub claims: u64,
}

/// Input to the link verification step.
#[derive(Clone, Debug)]
pub struct VerifyMessageInput {
    pub frog_id: FrogId,
    pub inscription_id: InscriptionId,
    pub address: BtcAddress,
    pub signature: String,
    pub pubkey: Option<String>,
    pub nonce: Nonce,
}

impl VerifyMessageInput {
    /// Minimum signature length accepted before any decoding (either
    /// encoding of a 65-byte signature is far longer).
    const MIN_SIGNATURE_LEN: usize = 8;

    fn validate(&self, network: BitcoinNetwork) -> Result<(), VerifyError> {
        if self.frog_id.value() == 0 {
            return Err(VerifyError::InvalidInput(
                "frog_id: must be positive".to_string(),
            ));
        }
        if !self.inscription_id.is_well_formed() {
            return Err(VerifyError::InvalidInput(
                "inscription_id: not a valid inscription id".to_string(),
            ));
        }
        validate_address(&self.address, network)?;
        if self.signature.trim().len() < Self::MIN_SIGNATURE_LEN {
            return Err(VerifyError::InvalidInput(
                "signature: too short".to_string(),
            ));
        }
        if !self.nonce.is_well_formed() {
            return Err(VerifyError::InvalidInput(
                "nonce: not a valid nonce".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_address(address: &BtcAddress, network: BitcoinNetwork) -> Result<(), VerifyError> {
    if !address.is_plausible_bech32() {
        return Err(VerifyError::InvalidInput(
            "address: not a bech32 address".to_string(),
        ));
    }
    if !address.matches_network(network) {
        return Err(VerifyError::InvalidInput(format!(
            "address: wrong network, expected {}",
            network.as_str()
        )));
    }
    Ok(())
}

/// The verification core. Owns the challenge/link tables through the store
/// and is the only writer to them.
pub struct VerificationService {
    store: Arc<dyn Store>,
    oracle: Arc<dyn OwnershipOracle>,
    params: VerificationParams,
}

impl VerificationService {
    pub fn new(
        store: Arc<dyn Store>,
        oracle: Arc<dyn OwnershipOracle>,
        params: VerificationParams,
    ) -> Self {
        Self {
            store,
            oracle,
            params,
        }
    }

    pub fn params(&self) -> &VerificationParams {
        &self.params
    }

    /// Issue a link challenge for a frog.
    ///
    /// If the frog registry knows this frog, the supplied inscription must
    /// match; unknown frogs are accepted (the registry may lag the chain).
    pub fn issue_challenge(
        &self,
        frog_id: FrogId,
        inscription_id: &InscriptionId,
    ) -> Result<IssuedChallenge, VerifyError> {
        if frog_id.value() == 0 {
            return Err(VerifyError::InvalidInput(
                "frog_id: must be positive".to_string(),
            ));
        }
        if !inscription_id.is_well_formed() {
            return Err(VerifyError::InvalidInput(
                "inscription_id: not a valid inscription id".to_string(),
            ));
        }
        if let Some(frog) = self.store.get_frog(frog_id)? {
            if frog.inscription_id != *inscription_id {
                return Err(VerifyError::InvalidInput(
                    "inscription_id: does not match the registered frog".to_string(),
                ));
            }
        }

        let nonce = generate_nonce();
        let issued_at = Timestamp::now();
        let expires_at = issued_at.plus_secs(self.params.challenge_ttl_secs);

        self.store.put_challenge(&ChallengeRecord {
            id: Uuid::new_v4(),
            frog_id,
            address: None,
            inscription_id: inscription_id.clone(),
            nonce: nonce.clone(),
            issued_at,
            expires_at,
            consumed: false,
        })?;

        let challenge = build_link_challenge(
            frog_id,
            inscription_id,
            &nonce,
            issued_at,
            expires_at,
            &self.params.site_domain,
        );
        tracing::info!(frog_id = frog_id.value(), %nonce, "issued link challenge");
        Ok(IssuedChallenge { challenge, nonce })
    }

    /// Verify a signed link challenge and commit the link.
    pub async fn verify_message(&self, input: VerifyMessageInput) -> Result<FroggyId, VerifyError> {
        input.validate(self.params.network)?;

        let challenge = self
            .store
            .get_challenge(&input.nonce)?
            .ok_or(VerifyError::ChallengeNotFound)?;
        if challenge.consumed {
            return Err(VerifyError::ChallengeConsumed);
        }
        if challenge.expires_at.is_past(Timestamp::now()) {
            return Err(VerifyError::ChallengeExpired);
        }

        // Rebuild the exact signed bytes from the request parameters and
        // the stored timestamps. A request for a different frog or
        // inscription produces different bytes and fails the signature
        // check.
        let challenge_text = build_link_challenge(
            input.frog_id,
            &input.inscription_id,
            &input.nonce,
            challenge.issued_at,
            challenge.expires_at,
            &self.params.site_domain,
        );

        verify_link_signature(
            &challenge_text,
            &input.address,
            &input.signature,
            input.pubkey.as_deref(),
            self.params.network,
        )?;

        let current_owner = self
            .oracle
            .current_owner(&input.inscription_id, Some(input.address.as_str()))
            .await?;
        if current_owner != input.address.as_str() {
            tracing::warn!(
                frog_id = input.frog_id.value(),
                signer = %input.address,
                "signature valid but signer is not the current owner"
            );
            return Err(VerifyError::OwnerMismatch);
        }

        let froggy_id = map_froggy_id(input.frog_id);
        let link = LinkRecord {
            frog_id: input.frog_id,
            froggy_id,
            inscription_id: input.inscription_id.clone(),
            owner_address: input.address.clone(),
            signature: input.signature.clone(),
            method: LinkMethod::Message,
            created_at: Timestamp::now(),
        };

        match self.store.commit_link(&link, &input.nonce)? {
            CommitOutcome::Committed => {
                tracing::info!(
                    frog_id = input.frog_id.value(),
                    froggy_id = froggy_id.value(),
                    owner = %input.address,
                    "link committed"
                );
                Ok(froggy_id)
            }
            CommitOutcome::AlreadyLinked => Err(VerifyError::AlreadyLinked),
            CommitOutcome::TargetInUse => Err(VerifyError::TargetInUse),
            CommitOutcome::AssetInUse => Err(VerifyError::AssetInUse),
            CommitOutcome::NonceMissing => Err(VerifyError::ChallengeNotFound),
            CommitOutcome::NonceConsumed => Err(VerifyError::ChallengeConsumed),
        }
    }

    /// Start a wallet-connect session.
    pub fn start_session(&self, address: &BtcAddress) -> Result<StartedSession, VerifyError> {
        validate_address(address, self.params.network)?;

        let nonce = generate_nonce();
        let created_at = Timestamp::now();
        let expires_at = created_at.plus_secs(self.params.challenge_ttl_secs);
        let message = build_connect_message(address, &nonce, created_at);

        self.store.put_session(&SessionRecord {
            address: address.clone(),
            nonce: nonce.clone(),
            status: SessionStatus::Pending,
            created_at,
            expires_at,
            used_at: None,
        })?;

        tracing::info!(%address, %nonce, "started connect session");
        Ok(StartedSession { nonce, message })
    }

    /// Complete a wallet-connect session: verify the signature over the
    /// connect message and mark the session used.
    pub fn complete_session(
        &self,
        address: &BtcAddress,
        signature: &serde_json::Value,
        message: &str,
    ) -> Result<Uuid, VerifyError> {
        validate_address(address, self.params.network)?;
        let nonce = extract_nonce(message).ok_or(VerifyError::NonceMissing)?;

        let session = self
            .store
            .get_session(address, &nonce)?
            .ok_or(VerifyError::SessionNotFound)?;
        if session.status == SessionStatus::Used {
            return Err(VerifyError::SessionUsed);
        }
        let now = Timestamp::now();
        if session.expires_at.is_past(now) {
            return Err(VerifyError::SessionExpired);
        }

        let signature_text =
            coalesce_signature(signature).ok_or(VerifyError::SignatureInvalid)?;
        if !verify_connect_signature(
            message,
            address.as_str(),
            &signature_text,
            self.params.network,
        ) {
            // The session stays pending: the wallet may retry with a
            // corrected signature until the session expires.
            return Err(VerifyError::SignatureInvalid);
        }

        match self.store.use_session(address, &nonce, now)? {
            ConsumeOutcome::Consumed => {}
            ConsumeOutcome::AlreadyConsumed => return Err(VerifyError::SessionUsed),
            ConsumeOutcome::NotFound => return Err(VerifyError::SessionNotFound),
        }

        let receipt = VerificationRecord {
            id: Uuid::new_v4(),
            address: address.clone(),
            status: VerificationStatus::Connected,
            frog_numbers: Vec::new(),
            created_at: now,
        };
        self.store.put_verification(&receipt)?;
        tracing::info!(%address, verification_id = %receipt.id, "connect session completed");
        Ok(receipt.id)
    }

    /// Confirm a wallet's claimed frog numbers.
    ///
    /// Batch policy: all-or-nothing — any number held by a different wallet
    /// rejects the whole batch with the full conflict list.
    pub fn confirm_claims(
        &self,
        address: &BtcAddress,
        numbers: &[u32],
    ) -> Result<Uuid, VerifyError> {
        validate_address(address, self.params.network)?;

        let now = Timestamp::now();
        let outcome = self.store.claim_batch(address, numbers, now)?;
        if !outcome.committed() {
            return Err(VerifyError::AlreadyClaimed {
                conflicts: outcome.conflicts,
            });
        }

        let receipt = VerificationRecord {
            id: Uuid::new_v4(),
            address: address.clone(),
            status: VerificationStatus::Verified,
            frog_numbers: numbers.to_vec(),
            created_at: now,
        };
        self.store.put_verification(&receipt)?;
        tracing::info!(
            %address,
            count = numbers.len(),
            verification_id = %receipt.id,
            "claims confirmed"
        );
        Ok(receipt.id)
    }

    /// Summary counters for the status endpoint.
    pub fn status_summary(&self) -> Result<StatusSummary, VerifyError> {
        Ok(StatusSummary {
            links: self.store.link_count()?,
            claims: self.store.claim_count()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bitcoin::hashes::{sha256, Hash};
    use bitcoin::key::Keypair;
    use bitcoin::secp256k1::{Message, Secp256k1};
    use froglink_indexer::{IndexerError, MockOracle};
    use froglink_store::{FrogRecord, MemoryStore};

    /// Oracle that always reports one fixed owner.
    struct FixedOracle(String);

    #[async_trait]
    impl OwnershipOracle for FixedOracle {
        async fn current_owner(
            &self,
            _inscription_id: &InscriptionId,
            _hint_address: Option<&str>,
        ) -> Result<String, IndexerError> {
            Ok(self.0.clone())
        }
    }

    /// Oracle that is always down.
    struct DownOracle;

    #[async_trait]
    impl OwnershipOracle for DownOracle {
        async fn current_owner(
            &self,
            _inscription_id: &InscriptionId,
            _hint_address: Option<&str>,
        ) -> Result<String, IndexerError> {
            Err(IndexerError::Unavailable("HTTP status 503".to_string()))
        }
    }

    struct TaprootWallet {
        keypair: Keypair,
        pubkey_hex: String,
        address: BtcAddress,
    }

    fn taproot_wallet(seed: u8) -> TaprootWallet {
        let secp = Secp256k1::new();
        let sk = bitcoin::secp256k1::SecretKey::from_slice(&[seed; 32]).unwrap();
        let keypair = Keypair::from_secret_key(&secp, &sk);
        let (xonly, _) = keypair.x_only_public_key();
        TaprootWallet {
            keypair,
            pubkey_hex: hex::encode(xonly.serialize()),
            address: BtcAddress::new(
                froglink_crypto::taproot_address(&xonly, BitcoinNetwork::Mainnet).to_string(),
            ),
        }
    }

    fn schnorr_sign(message: &str, keypair: &Keypair) -> String {
        let secp = Secp256k1::new();
        let digest = sha256::Hash::hash(message.as_bytes());
        let msg = Message::from_digest(digest.to_byte_array());
        hex::encode(secp.sign_schnorr_no_aux_rand(&msg, keypair).serialize())
    }

    fn service_with_oracle(oracle: Arc<dyn OwnershipOracle>) -> VerificationService {
        VerificationService::new(
            Arc::new(MemoryStore::new()),
            oracle,
            VerificationParams::default(),
        )
    }

    fn mock_service() -> VerificationService {
        service_with_oracle(Arc::new(MockOracle))
    }

    fn inscription() -> InscriptionId {
        InscriptionId::new(format!("{}i0", "ab".repeat(32)))
    }

    fn input_for(
        service: &VerificationService,
        wallet: &TaprootWallet,
        frog_id: u32,
    ) -> VerifyMessageInput {
        let issued = service
            .issue_challenge(FrogId(frog_id), &inscription())
            .unwrap();
        let signature = schnorr_sign(&issued.challenge, &wallet.keypair);
        VerifyMessageInput {
            frog_id: FrogId(frog_id),
            inscription_id: inscription(),
            address: wallet.address.clone(),
            signature,
            pubkey: Some(wallet.pubkey_hex.clone()),
            nonce: issued.nonce,
        }
    }

    // ── Challenge issuance ─────────────────────────────────────────────

    #[test]
    fn issue_then_rebuild_is_byte_identical() {
        let service = mock_service();
        let issued = service.issue_challenge(FrogId(42), &inscription()).unwrap();

        let stored = service
            .store
            .get_challenge(&issued.nonce)
            .unwrap()
            .unwrap();
        let rebuilt = build_link_challenge(
            FrogId(42),
            &inscription(),
            &issued.nonce,
            stored.issued_at,
            stored.expires_at,
            &service.params.site_domain,
        );
        assert_eq!(issued.challenge, rebuilt);
        assert!(issued.challenge.contains("Frog ID: 42"));
    }

    #[test]
    fn issue_rejects_registered_frog_with_wrong_inscription() {
        let service = mock_service();
        service
            .store
            .put_frog(&FrogRecord {
                frog_id: FrogId(42),
                inscription_id: InscriptionId::new("registeredi0"),
            })
            .unwrap();

        let err = service
            .issue_challenge(FrogId(42), &inscription())
            .unwrap_err();
        assert!(matches!(err, VerifyError::InvalidInput(_)));
    }

    #[test]
    fn issue_accepts_registered_frog_with_matching_inscription() {
        let service = mock_service();
        service
            .store
            .put_frog(&FrogRecord {
                frog_id: FrogId(42),
                inscription_id: inscription(),
            })
            .unwrap();
        assert!(service.issue_challenge(FrogId(42), &inscription()).is_ok());
    }

    #[test]
    fn issue_rejects_bad_input() {
        let service = mock_service();
        assert!(matches!(
            service.issue_challenge(FrogId(0), &inscription()),
            Err(VerifyError::InvalidInput(_))
        ));
        assert!(matches!(
            service.issue_challenge(FrogId(1), &InscriptionId::new("xy")),
            Err(VerifyError::InvalidInput(_))
        ));
    }

    // ── Link verification ──────────────────────────────────────────────

    #[tokio::test]
    async fn end_to_end_taproot_link() {
        let service = mock_service();
        let wallet = taproot_wallet(71);
        let input = input_for(&service, &wallet, 42);

        let froggy = service.verify_message(input.clone()).await.unwrap();
        assert_eq!(froggy, FroggyId(42));

        let link = service.store.get_link(FrogId(42)).unwrap().unwrap();
        assert_eq!(link.owner_address, wallet.address);
        assert_eq!(link.method, LinkMethod::Message);

        // Replaying the same request hits the consumed nonce.
        let err = service.verify_message(input).await.unwrap_err();
        assert!(matches!(err, VerifyError::ChallengeConsumed));
    }

    #[tokio::test]
    async fn tampered_signature_rejected() {
        let service = mock_service();
        let wallet = taproot_wallet(72);
        let mut input = input_for(&service, &wallet, 1);
        let mut sig = hex::decode(&input.signature).unwrap();
        sig[5] ^= 0xFF;
        input.signature = hex::encode(sig);

        let err = service.verify_message(input).await.unwrap_err();
        assert!(matches!(err, VerifyError::SignatureInvalid));
        assert_eq!(service.store.link_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn owner_mismatch_is_403_class_error() {
        let service = service_with_oracle(Arc::new(FixedOracle("bc1psomeoneelse".to_string())));
        let wallet = taproot_wallet(73);
        let input = input_for(&service, &wallet, 2);

        let err = service.verify_message(input).await.unwrap_err();
        assert!(matches!(err, VerifyError::OwnerMismatch));
        // Owner mismatch aborts before the commit: no link, and the
        // challenge stays pending for a retry after a transfer.
        assert_eq!(service.store.link_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn indexer_outage_is_unavailable_error() {
        let service = service_with_oracle(Arc::new(DownOracle));
        let wallet = taproot_wallet(74);
        let input = input_for(&service, &wallet, 3);

        let err = service.verify_message(input).await.unwrap_err();
        assert!(matches!(err, VerifyError::IndexerUnavailable(_)));
    }

    #[tokio::test]
    async fn second_link_for_same_frog_conflicts() {
        let service = mock_service();
        let wallet = taproot_wallet(75);

        let input = input_for(&service, &wallet, 5);
        service.verify_message(input).await.unwrap();

        // Fresh challenge, same frog: different inscription so only the
        // frog-id constraint can fire. Note the commit re-checks inside
        // the transaction.
        let other_inscription = InscriptionId::new(format!("{}i0", "cd".repeat(32)));
        let issued = service
            .issue_challenge(FrogId(5), &other_inscription)
            .unwrap();
        let signature = schnorr_sign(&issued.challenge, &wallet.keypair);
        let err = service
            .verify_message(VerifyMessageInput {
                frog_id: FrogId(5),
                inscription_id: other_inscription,
                address: wallet.address.clone(),
                signature,
                pubkey: Some(wallet.pubkey_hex.clone()),
                nonce: issued.nonce,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::AlreadyLinked));
    }

    #[tokio::test]
    async fn expired_challenge_rejected() {
        let store = Arc::new(MemoryStore::new());
        let service = VerificationService::new(
            store,
            Arc::new(MockOracle),
            VerificationParams {
                challenge_ttl_secs: 0,
                ..VerificationParams::default()
            },
        );
        let wallet = taproot_wallet(76);
        let issued = service.issue_challenge(FrogId(9), &inscription()).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));

        let err = service
            .verify_message(VerifyMessageInput {
                frog_id: FrogId(9),
                inscription_id: inscription(),
                address: wallet.address.clone(),
                signature: schnorr_sign(&issued.challenge, &wallet.keypair),
                pubkey: Some(wallet.pubkey_hex.clone()),
                nonce: issued.nonce,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::ChallengeExpired));
    }

    #[tokio::test]
    async fn unknown_nonce_rejected() {
        let service = mock_service();
        let wallet = taproot_wallet(77);
        let err = service
            .verify_message(VerifyMessageInput {
                frog_id: FrogId(1),
                inscription_id: inscription(),
                address: wallet.address.clone(),
                signature: "00".repeat(64),
                pubkey: Some(wallet.pubkey_hex.clone()),
                nonce: Nonce::new("ffffffffffffffff"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::ChallengeNotFound));
    }

    #[tokio::test]
    async fn taproot_without_pubkey_is_invalid_input() {
        let service = mock_service();
        let wallet = taproot_wallet(78);
        let mut input = input_for(&service, &wallet, 4);
        input.pubkey = None;
        let err = service.verify_message(input).await.unwrap_err();
        assert!(matches!(err, VerifyError::InvalidInput(_)));
    }

    // ── Connect sessions ───────────────────────────────────────────────

    #[test]
    fn session_lifecycle_with_legacy_signature() {
        use base64::Engine;
        use bitcoin::secp256k1::SecretKey;
        use bitcoin::sign_message::{signed_msg_hash, MessageSignature};

        // P2WPKH wallet signing legacy-style: the generic fallback's
        // first pass recovers the key and matches it to the address.
        let secp = Secp256k1::new();
        let sk = SecretKey::from_slice(&[81u8; 32]).unwrap();
        let pk = bitcoin::key::PublicKey::new(sk.public_key(&secp));
        let compressed = bitcoin::key::CompressedPublicKey::try_from(pk).unwrap();
        let address = BtcAddress::new(
            bitcoin::Address::p2wpkh(&compressed, bitcoin::Network::Bitcoin).to_string(),
        );

        let service = mock_service();
        let started = service.start_session(&address).unwrap();

        let msg_hash = signed_msg_hash(&started.message);
        let msg = Message::from_digest(msg_hash.to_byte_array());
        let recsig = secp.sign_ecdsa_recoverable(&msg, &sk);
        let sig_b64 = base64::engine::general_purpose::STANDARD
            .encode(MessageSignature::new(recsig, true).serialize());

        let verification_id = service
            .complete_session(
                &address,
                &serde_json::json!({ "signature": sig_b64 }),
                &started.message,
            )
            .unwrap();

        let receipt = service
            .store
            .latest_verification(&address)
            .unwrap()
            .unwrap();
        assert_eq!(receipt.id, verification_id);
        assert_eq!(receipt.status, VerificationStatus::Connected);

        // Second completion of the same session is a replay.
        let err = service
            .complete_session(
                &address,
                &serde_json::json!(sig_b64),
                &started.message,
            )
            .unwrap_err();
        assert!(matches!(err, VerifyError::SessionUsed));
    }

    #[test]
    fn complete_requires_nonce_in_message() {
        let service = mock_service();
        let address = BtcAddress::new("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
        let err = service
            .complete_session(&address, &serde_json::json!("sig"), "no nonce here")
            .unwrap_err();
        assert!(matches!(err, VerifyError::NonceMissing));
    }

    #[test]
    fn complete_unknown_session_rejected() {
        let service = mock_service();
        let address = BtcAddress::new("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
        let err = service
            .complete_session(
                &address,
                &serde_json::json!("sig"),
                "Nonce: deadbeef00112233",
            )
            .unwrap_err();
        assert!(matches!(err, VerifyError::SessionNotFound));
    }

    #[test]
    fn bad_signature_leaves_session_pending() {
        let service = mock_service();
        let address = BtcAddress::new("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
        let started = service.start_session(&address).unwrap();

        let err = service
            .complete_session(
                &address,
                &serde_json::json!("AAAA"),
                &started.message,
            )
            .unwrap_err();
        assert!(matches!(err, VerifyError::SignatureInvalid));

        let session = service
            .store
            .get_session(&address, &started.nonce)
            .unwrap()
            .unwrap();
        assert_eq!(session.status, SessionStatus::Pending);
    }

    #[test]
    fn unrecognized_signature_payload_is_signature_invalid() {
        let service = mock_service();
        let address = BtcAddress::new("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
        let started = service.start_session(&address).unwrap();
        let err = service
            .complete_session(
                &address,
                &serde_json::json!({ "unknown_field": "zzz" }),
                &started.message,
            )
            .unwrap_err();
        assert!(matches!(err, VerifyError::SignatureInvalid));
    }

    // ── Claims ─────────────────────────────────────────────────────────

    #[test]
    fn claim_confirmation_and_conflicts() {
        let service = mock_service();
        let addr_a = BtcAddress::new("bc1qaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        let addr_b = BtcAddress::new("bc1qbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");

        let id = service.confirm_claims(&addr_a, &[5, 6]).unwrap();
        let receipt = service.store.latest_verification(&addr_a).unwrap().unwrap();
        assert_eq!(receipt.id, id);
        assert_eq!(receipt.status, VerificationStatus::Verified);
        assert_eq!(receipt.frog_numbers, vec![5, 6]);

        let err = service.confirm_claims(&addr_b, &[6, 7]).unwrap_err();
        match err {
            VerifyError::AlreadyClaimed { conflicts } => assert_eq!(conflicts, vec![6]),
            other => panic!("expected AlreadyClaimed, got {other:?}"),
        }
        // Whole batch rejected: no receipt and no claim for 7.
        assert!(service.store.latest_verification(&addr_b).unwrap().is_none());
        assert!(service.store.get_claim(7).unwrap().is_none());
    }

    #[test]
    fn status_summary_counts() {
        let service = mock_service();
        let addr = BtcAddress::new("bc1qaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        service.confirm_claims(&addr, &[1, 2, 3]).unwrap();
        let summary = service.status_summary().unwrap();
        assert_eq!(summary.links, 0);
        assert_eq!(summary.claims, 3);
    }
}
