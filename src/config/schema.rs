//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the contract gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Chain and node connection settings.
    pub chain: ChainConfig,

    /// Deployed contract artifact settings.
    pub artifacts: ArtifactsConfig,

    /// Transaction signer settings.
    pub signer: SignerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Chain and JSON-RPC node configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Chain ID (e.g., 1 for Ethereum mainnet, 31337 for local Anvil).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Gas limit ceiling applied to every state-changing transaction.
    /// No per-call estimation is performed.
    pub gas_limit: u64,

    /// Maximum time to poll for a transaction receipt, in seconds.
    pub receipt_timeout_secs: u64,

    /// Receipt polling interval in milliseconds.
    pub receipt_poll_ms: u64,

    /// Verify the node's chain ID at startup (warn on mismatch).
    pub verify_chain_id: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 1,
            rpc_timeout_secs: 10,
            gas_limit: 2_000_000,
            receipt_timeout_secs: 120,
            receipt_poll_ms: 2_000,
            verify_chain_id: true,
        }
    }
}

/// Deployed contract artifact configuration.
///
/// Each listed contract is loaded from `<dir>/<Name>.json`, a JSON file
/// with `address` and `abi` fields as written by the deployment tooling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Directory holding one artifact file per contract.
    pub dir: String,

    /// Logical contract names to load at startup.
    pub contracts: Vec<String>,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: "artifacts".to_string(),
            contracts: vec![
                "UniversityAccessControl".to_string(),
                "CourseManagement".to_string(),
                "GradeManagement".to_string(),
                "ScheduleManagement".to_string(),
                "StatisticsTracker".to_string(),
            ],
        }
    }
}

/// Transaction signer configuration.
///
/// Only the name of the environment variable lives in the config file;
/// the key itself is never written to disk.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Environment variable holding the hex-encoded private key.
    pub key_env: String,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            key_env: "CAMPUS_SIGNER_KEY".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
