//! Oracle error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    /// Non-2xx response, timeout, or connection failure — the caller
    /// surfaces this as retryable (the retry is a fresh request, there is
    /// no retry loop here).
    #[error("indexer unavailable: {0}")]
    Unavailable(String),

    /// 2xx response, but no recognizable owner field in the body.
    #[error("owner not found in indexer response")]
    OwnerMissing,

    /// Mock mode was requested without a hint address to echo.
    #[error("mock oracle requires a hint address")]
    HintMissing,
}
