//! Shared utilities for the Froglink service.

pub mod logging;

pub use logging::init_tracing;
