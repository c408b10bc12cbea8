//! Axum server assembly.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use froglink_verification::VerificationService;

use crate::handlers;

/// Build the API router. Separate from [`RpcServer`] so tests can drive
/// handlers without binding a socket.
pub fn router(service: Arc<VerificationService>) -> Router {
    Router::new()
        .route("/challenge", post(handlers::handle_challenge))
        .route("/verify-message", post(handlers::handle_verify_message))
        .route("/verify-psbt", post(handlers::handle_verify_psbt))
        .route("/verify/start", post(handlers::handle_verify_start))
        .route("/verify/complete", post(handlers::handle_verify_complete))
        .route("/verify/confirm", post(handlers::handle_verify_confirm))
        .route("/status", get(handlers::handle_status))
        // The browser UI is the caller, so CORS stays permissive.
        .layer(CorsLayer::permissive())
        .with_state(service)
}

/// The HTTP server for the verification API.
pub struct RpcServer {
    service: Arc<VerificationService>,
    port: u16,
}

impl RpcServer {
    pub fn new(service: Arc<VerificationService>, port: u16) -> Self {
        Self { service, port }
    }

    /// Bind and serve until the process exits.
    pub async fn start(&self) -> std::io::Result<()> {
        let app = router(Arc::clone(&self.service));
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!(%addr, "verification API listening");
        axum::serve(listener, app).await
    }
}
