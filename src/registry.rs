//! Deployed contract artifact store.
//!
//! Loads one JSON artifact per configured contract name at startup and
//! resolves each into a [`ContractBinding`]. Artifacts use the shape the
//! deployment tooling exports: `{ "address": "0x...", "abi": [...] }`.
//! Files are read once; the registry is immutable afterwards.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::config::ArtifactsConfig;
use crate::contract::ContractBinding;
use crate::error::GatewayError;

/// Errors raised while loading contract artifacts at startup.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("cannot read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("artifact for {contract} is invalid: {source}")]
    Binding {
        contract: String,
        source: GatewayError,
    },

    #[error("no artifact loaded for contract {0}")]
    MissingContract(String),
}

/// On-disk artifact shape.
#[derive(Debug, Deserialize)]
struct DeployedArtifact {
    address: String,
    abi: serde_json::Value,
}

/// Immutable map from logical contract name to resolved binding.
#[derive(Debug, Clone, Default)]
pub struct ContractRegistry {
    bindings: HashMap<String, ContractBinding>,
}

impl ContractRegistry {
    /// Load every configured contract from `<dir>/<Name>.json`.
    pub fn load(config: &ArtifactsConfig) -> Result<Self, ArtifactError> {
        let dir = Path::new(&config.dir);
        let mut bindings = HashMap::new();

        for name in &config.contracts {
            let path = dir.join(format!("{}.json", name));
            let binding = Self::load_artifact(name, &path)?;
            tracing::info!(
                contract = %name,
                address = %binding.address(),
                functions = binding.function_names().len(),
                "Contract artifact loaded"
            );
            bindings.insert(name.clone(), binding);
        }

        Ok(Self { bindings })
    }

    fn load_artifact(name: &str, path: &Path) -> Result<ContractBinding, ArtifactError> {
        let content = fs::read_to_string(path).map_err(|e| ArtifactError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let artifact: DeployedArtifact =
            serde_json::from_str(&content).map_err(|e| ArtifactError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;

        ContractBinding::resolve(&artifact.address, &artifact.abi.to_string()).map_err(|e| {
            ArtifactError::Binding {
                contract: name.to_string(),
                source: e,
            }
        })
    }

    /// Look up a binding by logical contract name.
    pub fn get(&self, name: &str) -> Result<&ContractBinding, ArtifactError> {
        self.bindings
            .get(name)
            .ok_or_else(|| ArtifactError::MissingContract(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Loaded contract names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn from_bindings(bindings: HashMap<String, ContractBinding>) -> Self {
        Self { bindings }
    }
}
