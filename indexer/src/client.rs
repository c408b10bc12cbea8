//! HTTP oracle client and the mock used by dev/test configurations.

use async_trait::async_trait;
use froglink_types::InscriptionId;
use serde_json::Value;
use std::time::Duration;

use crate::{IndexerError, OwnershipOracle};

/// Default timeout for indexer requests. Timeouts fail the verification;
/// the end user retries with a fresh challenge.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Owner field names tried against the indexer response, in priority
/// order. Indexer deployments disagree on the response envelope.
const OWNER_FIELDS: [&[&str]; 4] = [
    &["data", "owner"],
    &["data", "address"],
    &["owner"],
    &["address"],
];

/// Client for an Ordinals inscription indexer.
///
/// Sends `GET {base_url}/v1/indexer/inscription/info/{inscription_id}` with
/// an optional bearer token and extracts the owner address from the
/// response.
pub struct HttpOracle {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpOracle {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self::with_timeout(base_url, api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            base_url: base_url.into(),
            api_key,
        }
    }
}

/// Walk the known field paths and return the first string owner found.
pub fn extract_owner(body: &Value) -> Option<String> {
    for path in OWNER_FIELDS {
        let mut current = body;
        for segment in path {
            match current.get(*segment) {
                Some(next) => current = next,
                None => {
                    current = &Value::Null;
                    break;
                }
            }
        }
        if let Some(owner) = current.as_str() {
            if !owner.is_empty() {
                return Some(owner.to_string());
            }
        }
    }
    None
}

#[async_trait]
impl OwnershipOracle for HttpOracle {
    async fn current_owner(
        &self,
        inscription_id: &InscriptionId,
        _hint_address: Option<&str>,
    ) -> Result<String, IndexerError> {
        let url = format!(
            "{}/v1/indexer/inscription/info/{}",
            self.base_url.trim_end_matches('/'),
            inscription_id
        );

        tracing::debug!(%url, "querying inscription owner");
        let mut request = self.http_client.get(&url).header("accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                IndexerError::Unavailable(format!("request timed out: {e}"))
            } else {
                IndexerError::Unavailable(format!("request failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(IndexerError::Unavailable(format!("HTTP status {status}")));
        }

        let body: Value = response
            .json()
            .await
            .unwrap_or(Value::Null);
        extract_owner(&body).ok_or(IndexerError::OwnerMissing)
    }
}

/// Oracle that answers with the caller's own address.
///
/// Selected only by an explicit `mock_owner = true` configuration for
/// local development against wallets with no real inscriptions.
pub struct MockOracle;

#[async_trait]
impl OwnershipOracle for MockOracle {
    async fn current_owner(
        &self,
        _inscription_id: &InscriptionId,
        hint_address: Option<&str>,
    ) -> Result<String, IndexerError> {
        hint_address
            .map(str::to_string)
            .ok_or(IndexerError::HintMissing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_owner_priority_order() {
        let body = json!({
            "data": { "owner": "bc1pnested", "address": "bc1qnested" },
            "owner": "bc1ptop",
            "address": "bc1qtop",
        });
        assert_eq!(extract_owner(&body), Some("bc1pnested".to_string()));

        let body = json!({ "data": { "address": "bc1qnested" }, "owner": "bc1ptop" });
        assert_eq!(extract_owner(&body), Some("bc1qnested".to_string()));

        let body = json!({ "owner": "bc1ptop", "address": "bc1qtop" });
        assert_eq!(extract_owner(&body), Some("bc1ptop".to_string()));

        let body = json!({ "address": "bc1qtop" });
        assert_eq!(extract_owner(&body), Some("bc1qtop".to_string()));
    }

    #[test]
    fn extract_owner_rejects_unusable_shapes() {
        assert_eq!(extract_owner(&json!({})), None);
        assert_eq!(extract_owner(&json!({ "data": {} })), None);
        assert_eq!(extract_owner(&json!({ "owner": 42 })), None);
        assert_eq!(extract_owner(&json!({ "owner": "" })), None);
        assert_eq!(extract_owner(&Value::Null), None);
    }

    #[tokio::test]
    async fn mock_oracle_echoes_hint() {
        let oracle = MockOracle;
        let id = InscriptionId::new("abcdefi0");
        let owner = oracle.current_owner(&id, Some("bc1pme")).await.unwrap();
        assert_eq!(owner, "bc1pme");

        let err = oracle.current_owner(&id, None).await.unwrap_err();
        assert!(matches!(err, IndexerError::HintMissing));
    }

    /// Spin up a mock indexer and exercise the full HTTP path.
    #[tokio::test]
    async fn http_oracle_happy_path_and_auth_header() {
        let app = axum::Router::new().route(
            "/v1/indexer/inscription/info/:id",
            axum::routing::get(
                |headers: axum::http::HeaderMap,
                 axum::extract::Path(id): axum::extract::Path<String>| async move {
                    assert_eq!(id, "abcdefi0");
                    assert_eq!(
                        headers.get("authorization").unwrap().to_str().unwrap(),
                        "Bearer sekrit"
                    );
                    axum::Json(serde_json::json!({
                        "code": 0,
                        "data": { "owner": "bc1pcurrentowner" }
                    }))
                },
            ),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let oracle = HttpOracle::new(
            format!("http://127.0.0.1:{port}"),
            Some("sekrit".to_string()),
        );
        let owner = oracle
            .current_owner(&InscriptionId::new("abcdefi0"), None)
            .await
            .unwrap();
        assert_eq!(owner, "bc1pcurrentowner");
    }

    /// Non-2xx responses map to Unavailable, not OwnerMissing.
    #[tokio::test]
    async fn http_oracle_maps_error_status() {
        let app = axum::Router::new().route(
            "/v1/indexer/inscription/info/:id",
            axum::routing::get(|| async {
                (axum::http::StatusCode::SERVICE_UNAVAILABLE, "down")
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let oracle = HttpOracle::new(format!("http://127.0.0.1:{port}"), None);
        let err = oracle
            .current_owner(&InscriptionId::new("abcdefi0"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, IndexerError::Unavailable(_)));
    }

    /// 2xx with no recognizable owner field is OwnerMissing.
    #[tokio::test]
    async fn http_oracle_missing_owner_field() {
        let app = axum::Router::new().route(
            "/v1/indexer/inscription/info/:id",
            axum::routing::get(|| async {
                axum::Json(serde_json::json!({ "code": 0, "data": {} }))
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let oracle = HttpOracle::new(format!("http://127.0.0.1:{port}"), None);
        let err = oracle
            .current_owner(&InscriptionId::new("abcdefi0"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, IndexerError::OwnerMissing));
    }
}
