//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: GatewayConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Semantic validation after serde has handled the syntax.
///
/// Collects every problem instead of stopping at the first one.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(format!(
            "listener.bind_address '{}' is not a valid socket address",
            config.listener.bind_address
        ));
    }
    if config.chain.rpc_url.parse::<url::Url>().is_err() {
        errors.push(format!("chain.rpc_url '{}' is not a valid URL", config.chain.rpc_url));
    }
    if config.chain.rpc_timeout_secs == 0 {
        errors.push("chain.rpc_timeout_secs must be greater than zero".to_string());
    }
    if config.chain.gas_limit == 0 {
        errors.push("chain.gas_limit must be greater than zero".to_string());
    }
    if config.chain.receipt_poll_ms == 0 {
        errors.push("chain.receipt_poll_ms must be greater than zero".to_string());
    }
    if config.artifacts.contracts.is_empty() {
        errors.push("artifacts.contracts must list at least one contract".to_string());
    }
    if config.signer.key_env.trim().is_empty() {
        errors.push("signer.key_env must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
