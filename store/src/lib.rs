//! Abstract storage traits for the Froglink verification service.
//!
//! Every storage backend (LMDB for production, in-memory for local
//! development and testing) implements these traits. The rest of the
//! codebase depends only on the traits; the daemon picks the backend at
//! startup. The challenge, session, link, and claim tables are owned
//! exclusively by the verification core.

pub mod challenge;
pub mod claim;
pub mod error;
pub mod frog;
pub mod link;
pub mod memory;
pub mod session;
pub mod verification;

pub use challenge::{ChallengeRecord, ChallengeStore, ConsumeOutcome};
pub use claim::{ClaimBatchOutcome, ClaimRecord, ClaimStore};
pub use error::StoreError;
pub use frog::{FrogRecord, FrogStore};
pub use link::{CommitOutcome, LinkMethod, LinkRecord, LinkStore};
pub use memory::MemoryStore;
pub use session::{SessionRecord, SessionStatus, SessionStore};
pub use verification::{VerificationRecord, VerificationStatus, VerificationStore};

/// The full storage surface the verification core runs against.
///
/// Blanket-implemented for anything providing every table trait, so
/// backends only implement the individual traits.
pub trait Store:
    FrogStore
    + ChallengeStore
    + SessionStore
    + LinkStore
    + ClaimStore
    + VerificationStore
    + Send
    + Sync
{
}

impl<T> Store for T where
    T: FrogStore
        + ChallengeStore
        + SessionStore
        + LinkStore
        + ClaimStore
        + VerificationStore
        + Send
        + Sync
{
}
