//! Service configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use froglink_types::BitcoinNetwork;

/// Which storage backend to run against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Durable LMDB store — the default.
    Lmdb,
    /// In-memory store for local development only; data dies with the
    /// process.
    Memory,
}

/// Configuration for the Froglink service.
///
/// Can be loaded from a TOML file via [`ServiceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). CLI flags and environment
/// variables override file values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Bitcoin network addresses are checked against.
    #[serde(default)]
    pub network: BitcoinNetwork,

    /// Port the verification API listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Data directory for the LMDB store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Storage backend.
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,

    /// Maximum LMDB map size in bytes.
    #[serde(default = "default_map_size")]
    pub lmdb_map_size: usize,

    /// Site identity embedded in every challenge (domain separation).
    #[serde(default = "default_site_domain")]
    pub site_domain: String,

    /// Challenge and session lifetime in seconds.
    #[serde(default = "default_challenge_ttl")]
    pub challenge_ttl_secs: u64,

    /// Base URL of the inscription indexer.
    #[serde(default = "default_indexer_url")]
    pub indexer_url: String,

    /// Bearer token for the indexer, if it requires one.
    #[serde(default)]
    pub indexer_api_key: Option<String>,

    /// Answer ownership queries with the caller's own address instead of
    /// asking the indexer. Dev/test only; never enable in production.
    #[serde(default)]
    pub mock_owner: bool,

    /// Optional JSON seed file for the frog registry:
    /// `[{"frog_id": 1, "inscription_id": "…i0"}, …]`.
    #[serde(default)]
    pub frogs_seed: Option<PathBuf>,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_listen_port() -> u16 {
    8787
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./froglink_data")
}

fn default_backend() -> StorageBackend {
    StorageBackend::Lmdb
}

fn default_map_size() -> usize {
    1024 * 1024 * 1024 // 1 GiB
}

fn default_site_domain() -> String {
    "bitcoinfrogs.art".to_string()
}

fn default_challenge_ttl() -> u64 {
    600
}

fn default_indexer_url() -> String {
    "https://open-api.unisat.io".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("ServiceConfig is always serializable to TOML")
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            network: BitcoinNetwork::default(),
            listen_port: default_listen_port(),
            data_dir: default_data_dir(),
            backend: default_backend(),
            lmdb_map_size: default_map_size(),
            site_domain: default_site_domain(),
            challenge_ttl_secs: default_challenge_ttl(),
            indexer_url: default_indexer_url(),
            indexer_api_key: None,
            mock_owner: false,
            frogs_seed: None,
            log_level: default_log_level(),
        }
    }
}
