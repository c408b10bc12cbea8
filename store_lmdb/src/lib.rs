//! LMDB storage backend for the Froglink verification service.
//!
//! Implements all storage traits from `froglink-store` using the `heed`
//! LMDB bindings. Each logical table maps to one LMDB database within a
//! single environment; multi-table operations (`commit_link`) and
//! conditional updates (`consume_challenge`, `use_session`, `claim_batch`)
//! run inside one write transaction, which LMDB serializes — that is what
//! makes them linearizable.

pub mod challenge;
pub mod claim;
pub mod environment;
pub mod error;
pub mod frog;
pub mod link;
pub mod session;
pub mod verification;

pub use environment::LmdbStore;
pub use error::LmdbError;
