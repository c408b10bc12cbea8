//! Request handlers and their JSON DTOs.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use froglink_types::{BtcAddress, FrogId, InscriptionId, Nonce};
use froglink_verification::{VerificationService, VerifyMessageInput};

use crate::error::ApiError;

// ── Challenge ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChallengeRequest {
    pub frog_id: u32,
    pub inscription_id: String,
}

#[derive(Debug, Serialize)]
pub struct ChallengeResponse {
    pub challenge: String,
    pub nonce: String,
}

pub async fn handle_challenge(
    State(service): State<Arc<VerificationService>>,
    Json(body): Json<ChallengeRequest>,
) -> Result<Json<ChallengeResponse>, ApiError> {
    let issued = service.issue_challenge(
        FrogId(body.frog_id),
        &InscriptionId::new(body.inscription_id),
    )?;
    Ok(Json(ChallengeResponse {
        challenge: issued.challenge,
        nonce: issued.nonce.to_string(),
    }))
}

// ── Link verification ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyMessageRequest {
    pub frog_id: u32,
    pub inscription_id: String,
    pub address: String,
    pub signature: String,
    #[serde(default)]
    pub pubkey: Option<String>,
    pub nonce: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyMessageResponse {
    pub ok: bool,
    pub froggy_id: u32,
}

pub async fn handle_verify_message(
    State(service): State<Arc<VerificationService>>,
    Json(body): Json<VerifyMessageRequest>,
) -> Result<Json<VerifyMessageResponse>, ApiError> {
    let froggy_id = service
        .verify_message(VerifyMessageInput {
            frog_id: FrogId(body.frog_id),
            inscription_id: InscriptionId::new(body.inscription_id),
            address: BtcAddress::new(body.address),
            signature: body.signature,
            pubkey: body.pubkey,
            nonce: Nonce::new(body.nonce),
        })
        .await?;
    Ok(Json(VerifyMessageResponse {
        ok: true,
        froggy_id: froggy_id.value(),
    }))
}

// ── PSBT flow (not implemented) ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyPsbtRequest {
    pub frog_id: u32,
    pub inscription_id: String,
    pub address: String,
    pub psbt_hex: String,
    pub nonce: String,
}

pub async fn handle_verify_psbt(
    Json(body): Json<VerifyPsbtRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    // Validate the shape so malformed requests still get a 400.
    if body.frog_id == 0
        || !InscriptionId::new(body.inscription_id).is_well_formed()
        || !BtcAddress::new(body.address).is_plausible_bech32()
        || body.psbt_hex.is_empty()
        || !Nonce::new(body.nonce).is_well_formed()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "invalid input" })),
        );
    }
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(serde_json::json!({ "error": "psbt verification not implemented" })),
    )
}

// ── Connect sessions ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyStartRequest {
    pub address: String,
    /// Wallet provider hint; recorded in logs only.
    #[serde(default)]
    pub provider: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifyStartResponse {
    pub nonce: String,
    pub message: String,
}

pub async fn handle_verify_start(
    State(service): State<Arc<VerificationService>>,
    Json(body): Json<VerifyStartRequest>,
) -> Result<Json<VerifyStartResponse>, ApiError> {
    if let Some(provider) = &body.provider {
        tracing::debug!(address = %body.address, provider = %provider, "connect start");
    }
    let started = service.start_session(&BtcAddress::new(body.address))?;
    Ok(Json(VerifyStartResponse {
        nonce: started.nonce.to_string(),
        message: started.message,
    }))
}

#[derive(Deserialize)]
pub struct VerifyCompleteRequest {
    pub address: String,
    /// Heterogeneous wallet payload: a string or an object; the
    /// verification layer normalizes it.
    pub signature: serde_json::Value,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyCompleteResponse {
    pub ok: bool,
    pub verification_id: String,
}

pub async fn handle_verify_complete(
    State(service): State<Arc<VerificationService>>,
    Json(body): Json<VerifyCompleteRequest>,
) -> Result<Json<VerifyCompleteResponse>, ApiError> {
    let id = service.complete_session(
        &BtcAddress::new(body.address),
        &body.signature,
        &body.message,
    )?;
    Ok(Json(VerifyCompleteResponse {
        ok: true,
        verification_id: id.to_string(),
    }))
}

#[derive(Deserialize)]
pub struct VerifyConfirmRequest {
    pub address: String,
    pub numbers: Vec<u32>,
}

#[derive(Debug, Serialize)]
pub struct VerifyConfirmResponse {
    pub ok: bool,
    pub verification_id: String,
}

pub async fn handle_verify_confirm(
    State(service): State<Arc<VerificationService>>,
    Json(body): Json<VerifyConfirmRequest>,
) -> Result<Json<VerifyConfirmResponse>, ApiError> {
    let id = service.confirm_claims(&BtcAddress::new(body.address), &body.numbers)?;
    Ok(Json(VerifyConfirmResponse {
        ok: true,
        verification_id: id.to_string(),
    }))
}

// ── Status ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub ok: bool,
    pub network: String,
    pub links: u64,
    pub claims: u64,
}

pub async fn handle_status(
    State(service): State<Arc<VerificationService>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let summary = service.status_summary()?;
    Ok(Json(StatusResponse {
        ok: true,
        network: service.params().network.as_str().to_string(),
        links: summary.links,
        claims: summary.claims,
    }))
}
