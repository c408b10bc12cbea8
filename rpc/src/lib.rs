//! HTTP API for the Froglink verification service.
//!
//! Endpoints consumed by the web UI:
//! - `POST /challenge` — issue a link challenge
//! - `POST /verify-message` — verify a signed challenge and commit the link
//! - `POST /verify-psbt` — PSBT flow placeholder (501)
//! - `POST /verify/start` — start a wallet-connect session
//! - `POST /verify/complete` — verify the connect signature
//! - `POST /verify/confirm` — confirm claimed frog numbers
//! - `GET /status` — health and summary counters
//!
//! All responses are JSON; failures carry an `error` string and, where
//! applicable, `details` or `conflicts`.

pub mod error;
pub mod handlers;
pub mod server;

pub use server::{router, RpcServer};
