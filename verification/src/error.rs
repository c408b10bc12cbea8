//! Error taxonomy for the verification flows.
//!
//! Every failure a client can branch on gets its own variant; the HTTP
//! layer maps them to stable status codes. Replay and timing defenses
//! (`ChallengeConsumed`, `ChallengeExpired`, `SessionUsed`) are deliberate,
//! distinguishable rejections rather than generic errors.

use froglink_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    /// Schema violation, with field-level detail.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("challenge not found")]
    ChallengeNotFound,

    #[error("challenge expired")]
    ChallengeExpired,

    #[error("challenge already consumed")]
    ChallengeConsumed,

    #[error("session not found")]
    SessionNotFound,

    #[error("session already used")]
    SessionUsed,

    #[error("session expired")]
    SessionExpired,

    #[error("nonce missing from message")]
    NonceMissing,

    /// Well-formed request, cryptographic check failed.
    #[error("signature could not be verified")]
    SignatureInvalid,

    #[error("address does not match the supplied public key")]
    AddressPubkeyMismatch,

    #[error("unsupported address type")]
    UnsupportedAddressType,

    /// The signer proved control of the address, but the indexer reports a
    /// different current owner for the inscription.
    #[error("signer is not the current owner")]
    OwnerMismatch,

    #[error("frog already linked")]
    AlreadyLinked,

    #[error("froggy already linked to a different frog")]
    TargetInUse,

    #[error("inscription already linked to a different frog")]
    AssetInUse,

    #[error("already claimed")]
    AlreadyClaimed { conflicts: Vec<u32> },

    #[error("indexer unavailable: {0}")]
    IndexerUnavailable(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<froglink_crypto::CryptoError> for VerifyError {
    fn from(e: froglink_crypto::CryptoError) -> Self {
        use froglink_crypto::CryptoError;
        match e {
            CryptoError::AddressPubkeyMismatch => VerifyError::AddressPubkeyMismatch,
            CryptoError::UnsupportedAddressType => VerifyError::UnsupportedAddressType,
            CryptoError::PubkeyRequired => {
                VerifyError::InvalidInput("pubkey: required for taproot addresses".to_string())
            }
            CryptoError::InvalidPubkey => {
                VerifyError::InvalidInput("pubkey: not a valid public key".to_string())
            }
            CryptoError::InvalidAddress(addr) => {
                VerifyError::InvalidInput(format!("address: {addr} is not valid"))
            }
            CryptoError::SignatureInvalid => VerifyError::SignatureInvalid,
        }
    }
}

impl From<froglink_indexer::IndexerError> for VerifyError {
    fn from(e: froglink_indexer::IndexerError) -> Self {
        VerifyError::IndexerUnavailable(e.to_string())
    }
}
