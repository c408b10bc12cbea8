//! Wallet-ownership verification flows.
//!
//! Ties the pieces together end to end: challenge issuance (canonical
//! message + nonce), signature verification by address kind, the ownership
//! oracle check, and the atomic link/claim commits. The HTTP layer calls
//! into [`VerificationService`] and maps [`VerifyError`] to status codes.

pub mod error;
pub mod flow;
pub mod map;
pub mod message;
pub mod nonce;

pub use error::VerifyError;
pub use flow::{
    IssuedChallenge, StartedSession, StatusSummary, VerificationParams, VerificationService,
    VerifyMessageInput,
};
pub use map::map_froggy_id;
pub use message::{build_connect_message, build_link_challenge, extract_nonce};
pub use nonce::generate_nonce;
