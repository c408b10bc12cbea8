//! Mapping from verification errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use froglink_verification::VerifyError;
use serde_json::json;

/// Wrapper so `VerifyError` can be returned straight from handlers.
#[derive(Debug)]
pub struct ApiError(pub VerifyError);

impl From<VerifyError> for ApiError {
    fn from(e: VerifyError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let e = self.0;
        let status = match &e {
            VerifyError::InvalidInput(_)
            | VerifyError::ChallengeNotFound
            | VerifyError::ChallengeExpired
            | VerifyError::ChallengeConsumed
            | VerifyError::SessionNotFound
            | VerifyError::SessionUsed
            | VerifyError::SessionExpired
            | VerifyError::NonceMissing
            | VerifyError::AddressPubkeyMismatch
            | VerifyError::UnsupportedAddressType => StatusCode::BAD_REQUEST,
            VerifyError::SignatureInvalid => StatusCode::UNPROCESSABLE_ENTITY,
            VerifyError::OwnerMismatch => StatusCode::FORBIDDEN,
            VerifyError::AlreadyLinked
            | VerifyError::TargetInUse
            | VerifyError::AssetInUse
            | VerifyError::AlreadyClaimed { .. } => StatusCode::CONFLICT,
            VerifyError::IndexerUnavailable(_) => StatusCode::BAD_GATEWAY,
            VerifyError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &e {
            VerifyError::AlreadyClaimed { conflicts } => json!({
                "error": "already_claimed",
                "conflicts": conflicts,
            }),
            VerifyError::InvalidInput(detail) => json!({
                "error": "invalid input",
                "details": detail,
            }),
            // Internal details stay in the log, not the response.
            VerifyError::Store(inner) => {
                tracing::error!(error = %inner, "storage failure on request path");
                json!({ "error": "internal error" })
            }
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
