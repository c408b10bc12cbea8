//! Froglink daemon — entry point for running the verification service.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use froglink_indexer::{HttpOracle, MockOracle, OwnershipOracle};
use froglink_store::{FrogRecord, FrogStore, MemoryStore, Store};
use froglink_store_lmdb::LmdbStore;
use froglink_types::{BitcoinNetwork, FrogId, InscriptionId};
use froglink_verification::{VerificationParams, VerificationService};

use config::{ServiceConfig, StorageBackend};

#[derive(Parser)]
#[command(name = "froglink-daemon", about = "Froglink wallet verification service")]
struct Cli {
    /// Network to verify against: "mainnet" or "testnet".
    /// When a config file is provided, defaults to the file's value.
    #[arg(long, env = "FROGLINK_NETWORK")]
    network: Option<String>,

    /// Port for the verification API.
    #[arg(long, env = "FROGLINK_PORT")]
    port: Option<u16>,

    /// Data directory for the LMDB store.
    #[arg(long, env = "FROGLINK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Storage backend: "lmdb" (durable, default) or "memory" (dev only).
    #[arg(long, env = "FROGLINK_BACKEND")]
    backend: Option<String>,

    /// Answer ownership queries with the caller's address (dev only).
    #[arg(long, env = "FROGLINK_MOCK_OWNER")]
    mock_owner: bool,

    /// Indexer API key (bearer token).
    #[arg(long, env = "FROGLINK_INDEXER_API_KEY")]
    indexer_api_key: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "FROGLINK_LOG_LEVEL")]
    log_level: String,

    /// Path to a TOML configuration file. If provided, file settings are
    /// used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_network(s: &str) -> BitcoinNetwork {
    match s.to_lowercase().as_str() {
        "testnet" => BitcoinNetwork::Testnet,
        _ => BitcoinNetwork::Mainnet,
    }
}

fn parse_backend(s: &str) -> StorageBackend {
    match s.to_lowercase().as_str() {
        "memory" => StorageBackend::Memory,
        _ => StorageBackend::Lmdb,
    }
}

/// Load the frog registry seed file into the store.
fn seed_frogs(store: &dyn Store, path: &std::path::Path) -> anyhow::Result<u64> {
    #[derive(serde::Deserialize)]
    struct SeedEntry {
        frog_id: u32,
        inscription_id: String,
    }

    let content = std::fs::read_to_string(path)?;
    let entries: Vec<SeedEntry> = serde_json::from_str(&content)?;
    let mut loaded = 0;
    for entry in entries {
        store.put_frog(&FrogRecord {
            frog_id: FrogId(entry.frog_id),
            inscription_id: InscriptionId::new(entry.inscription_id),
        })?;
        loaded += 1;
    }
    Ok(loaded)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config: Option<ServiceConfig> = if let Some(ref config_path) = cli.config {
        match ServiceConfig::from_toml_file(config_path) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                eprintln!(
                    "failed to load config file {}: {e}, using CLI defaults",
                    config_path.display()
                );
                None
            }
        }
    } else {
        None
    };

    let base = file_config.unwrap_or_default();
    let config = ServiceConfig {
        network: cli
            .network
            .as_deref()
            .map(parse_network)
            .unwrap_or(base.network),
        listen_port: cli.port.unwrap_or(base.listen_port),
        data_dir: cli.data_dir.unwrap_or(base.data_dir),
        backend: cli
            .backend
            .as_deref()
            .map(parse_backend)
            .unwrap_or(base.backend),
        mock_owner: cli.mock_owner || base.mock_owner,
        indexer_api_key: cli.indexer_api_key.or(base.indexer_api_key),
        log_level: cli.log_level,
        ..base
    };

    froglink_utils::init_tracing(&config.log_level);

    let store: Arc<dyn Store> = match config.backend {
        StorageBackend::Lmdb => Arc::new(LmdbStore::open(
            &config.data_dir,
            config.lmdb_map_size,
        )?),
        StorageBackend::Memory => {
            tracing::warn!("running on the in-memory store; data dies with the process");
            Arc::new(MemoryStore::new())
        }
    };

    if let Some(seed_path) = &config.frogs_seed {
        let loaded = seed_frogs(store.as_ref(), seed_path)?;
        tracing::info!(count = loaded, path = %seed_path.display(), "seeded frog registry");
    }

    let oracle: Arc<dyn OwnershipOracle> = if config.mock_owner {
        tracing::warn!("ownership oracle is MOCKED; owners are not checked on-chain");
        Arc::new(MockOracle)
    } else {
        Arc::new(HttpOracle::new(
            config.indexer_url.clone(),
            config.indexer_api_key.clone(),
        ))
    };

    let service = Arc::new(VerificationService::new(
        store,
        oracle,
        VerificationParams {
            network: config.network,
            site_domain: config.site_domain.clone(),
            challenge_ttl_secs: config.challenge_ttl_secs,
        },
    ));

    tracing::info!(
        network = config.network.as_str(),
        port = config.listen_port,
        backend = ?config.backend,
        "starting Froglink verification service"
    );

    froglink_rpc::RpcServer::new(service, config.listen_port)
        .start()
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_and_backend_parsing() {
        assert_eq!(parse_network("testnet"), BitcoinNetwork::Testnet);
        assert_eq!(parse_network("TESTNET"), BitcoinNetwork::Testnet);
        assert_eq!(parse_network("mainnet"), BitcoinNetwork::Mainnet);
        assert_eq!(parse_network("anything-else"), BitcoinNetwork::Mainnet);
        assert_eq!(parse_backend("memory"), StorageBackend::Memory);
        assert_eq!(parse_backend("lmdb"), StorageBackend::Lmdb);
    }

    #[test]
    fn seed_file_loads_into_store() {
        let dir = tempfile::tempdir().unwrap();
        let seed_path = dir.path().join("frogs.json");
        std::fs::write(
            &seed_path,
            r#"[
                {"frog_id": 1, "inscription_id": "aaaai0"},
                {"frog_id": 2, "inscription_id": "bbbbi0"}
            ]"#,
        )
        .unwrap();

        let store = MemoryStore::new();
        let loaded = seed_frogs(&store, &seed_path).unwrap();
        assert_eq!(loaded, 2);
        assert_eq!(
            store
                .get_frog(FrogId(2))
                .unwrap()
                .unwrap()
                .inscription_id
                .as_str(),
            "bbbbi0"
        );
    }

    #[test]
    fn malformed_seed_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let seed_path = dir.path().join("frogs.json");
        std::fs::write(&seed_path, "not json").unwrap();
        let store = MemoryStore::new();
        assert!(seed_frogs(&store, &seed_path).is_err());
    }
}
