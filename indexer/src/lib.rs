//! Ownership oracle — answers "which address currently owns this
//! inscription" by querying an external indexer.
//!
//! The oracle is a trait so the verification flow can run against the real
//! HTTP client in production and a fixed answer in tests or explicitly
//! mocked environments.

pub mod client;
pub mod error;

pub use client::{HttpOracle, MockOracle};
pub use error::IndexerError;

use async_trait::async_trait;
use froglink_types::InscriptionId;

/// Resolves the current on-chain owner of an inscription.
#[async_trait]
pub trait OwnershipOracle: Send + Sync {
    /// Current owner address of `inscription_id`.
    ///
    /// `hint_address` is the address the caller claims to control; only the
    /// mock oracle uses it (and the mock is never the default in a
    /// production configuration).
    async fn current_owner(
        &self,
        inscription_id: &InscriptionId,
        hint_address: Option<&str>,
    ) -> Result<String, IndexerError>;
}
