//! Fundamental types for the Froglink verification service.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: frog/froggy/inscription identifiers, Bitcoin address
//! classification, nonces, timestamps, and the network selector.

pub mod address;
pub mod ids;
pub mod network;
pub mod nonce;
pub mod time;

pub use address::{AddressKind, BtcAddress};
pub use ids::{FrogId, FroggyId, InscriptionId};
pub use network::BitcoinNetwork;
pub use nonce::Nonce;
pub use time::Timestamp;
