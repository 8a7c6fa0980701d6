//! Wallet management and transaction signing.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized
//!
//! There is deliberately no local nonce counter here: the write path
//! fetches the nonce fresh from the node on every invocation. Two
//! concurrent writes from the same signer can therefore race on a nonce;
//! callers that need concurrency must serialize externally.

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::error::{GatewayError, GatewayResult};

/// Transaction signer derived from a single private key.
#[derive(Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
    network_wallet: EthereumWallet,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// Accepts the key with or without a `0x` prefix. The key is parsed
    /// and held in memory only; it is never logged.
    pub fn from_private_key(private_key_hex: &str) -> GatewayResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| GatewayError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::info!(address = %signer.address(), "Wallet initialized");

        let network_wallet = EthereumWallet::from(signer.clone());
        Ok(Self {
            signer,
            network_wallet,
        })
    }

    /// Load the wallet from the named environment variable.
    pub fn from_env(key_env: &str) -> GatewayResult<Self> {
        let private_key = std::env::var(key_env).map_err(|_| {
            GatewayError::Wallet(format!("Environment variable {} not set", key_env))
        })?;

        Self::from_private_key(&private_key)
    }

    /// Get the signer's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Get the network wallet handle used to sign transaction envelopes.
    pub fn network_wallet(&self) -> &EthereumWallet {
        &self.network_wallet
    }
}

impl std::fmt::Debug for Wallet {
    // Debug shows the address only, never key material.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.signer.address())
            .finish()
    }
}
