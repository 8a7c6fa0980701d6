//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to a JSON-RPC endpoint
//! - Query chain state (chain id, gas price, nonces, balances, receipts)
//! - Execute read-only calls and broadcast raw signed transactions
//! - Bound every request with a configurable timeout
//!
//! No RPC is allowed to block indefinitely; an expired window surfaces as
//! `GatewayError::Timeout`.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::transports::RpcError;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::ChainConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::observability::metrics;

/// Blockchain RPC client wrapper.
#[derive(Clone)]
pub struct NodeClient {
    provider: DynProvider,
    rpc_url: String,
    timeout_duration: Duration,
    timeout_secs: u64,
}

impl NodeClient {
    /// Create a new node client.
    ///
    /// No network I/O happens here unless `verify_chain_id` is set, in
    /// which case a mismatch is logged but does not fail startup.
    pub async fn connect(config: &ChainConfig) -> GatewayResult<Self> {
        let rpc_url: url::Url = config.rpc_url.parse().map_err(|e| {
            GatewayError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;

        let client = Self {
            provider: ProviderBuilder::new().connect_http(rpc_url).erased(),
            rpc_url: config.rpc_url.clone(),
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
            timeout_secs: config.rpc_timeout_secs,
        };

        if config.verify_chain_id {
            match client.chain_id().await {
                Ok(actual) if actual == config.chain_id => {
                    tracing::info!(
                        rpc_url = %config.rpc_url,
                        chain_id = actual,
                        "Node client initialized"
                    );
                }
                Ok(actual) => {
                    tracing::warn!(
                        expected = config.chain_id,
                        actual = actual,
                        "Chain ID mismatch between config and node"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Node client initialized but chain verification failed"
                    );
                }
            }
        }

        Ok(client)
    }

    /// Get the chain ID from the node.
    pub async fn chain_id(&self) -> GatewayResult<u64> {
        self.rpc("eth_chainId", self.provider.get_chain_id()).await
    }

    /// Get the latest block number.
    pub async fn block_number(&self) -> GatewayResult<u64> {
        self.rpc("eth_blockNumber", self.provider.get_block_number()).await
    }

    /// Get current gas price in wei.
    pub async fn gas_price(&self) -> GatewayResult<u128> {
        self.rpc("eth_gasPrice", self.provider.get_gas_price()).await
    }

    /// Get the balance of an address.
    pub async fn balance(&self, address: Address) -> GatewayResult<U256> {
        self.rpc("eth_getBalance", self.provider.get_balance(address)).await
    }

    /// Get the transaction count (next nonce) for an address.
    pub async fn transaction_count(&self, address: Address) -> GatewayResult<u64> {
        self.rpc(
            "eth_getTransactionCount",
            self.provider.get_transaction_count(address),
        )
        .await
    }

    /// Get a transaction receipt by hash, if one exists yet.
    pub async fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> GatewayResult<Option<TransactionReceipt>> {
        self.rpc(
            "eth_getTransactionReceipt",
            self.provider.get_transaction_receipt(tx_hash),
        )
        .await
    }

    /// Execute a read-only call against the latest observed state.
    ///
    /// A node-reported execution error is classified as `CallReverted`,
    /// carrying whatever reason string the node supplied.
    pub async fn call(&self, request: TransactionRequest) -> GatewayResult<Bytes> {
        let result = timeout(self.timeout_duration, self.provider.call(request)).await;
        match result {
            Ok(Ok(bytes)) => {
                metrics::record_rpc("eth_call", true);
                Ok(bytes)
            }
            Ok(Err(RpcError::ErrorResp(payload))) => {
                metrics::record_rpc("eth_call", false);
                Err(GatewayError::CallReverted(payload.message.to_string()))
            }
            Ok(Err(e)) => {
                metrics::record_rpc("eth_call", false);
                Err(GatewayError::Rpc(e.to_string()))
            }
            Err(_) => {
                metrics::record_rpc("eth_call", false);
                Err(GatewayError::Timeout(self.timeout_secs))
            }
        }
    }

    /// Broadcast a raw signed transaction and return the node-assigned hash.
    ///
    /// A node-side rejection (nonce too low, insufficient funds, gas too
    /// low) is classified as `Broadcast`; transport failures stay `Rpc`.
    pub async fn send_raw_transaction(&self, raw: &[u8]) -> GatewayResult<TxHash> {
        let result = timeout(
            self.timeout_duration,
            self.provider.send_raw_transaction(raw),
        )
        .await;
        match result {
            Ok(Ok(pending)) => {
                metrics::record_rpc("eth_sendRawTransaction", true);
                Ok(*pending.tx_hash())
            }
            Ok(Err(RpcError::ErrorResp(payload))) => {
                metrics::record_rpc("eth_sendRawTransaction", false);
                Err(GatewayError::Broadcast(payload.message.to_string()))
            }
            Ok(Err(e)) => {
                metrics::record_rpc("eth_sendRawTransaction", false);
                Err(GatewayError::Rpc(e.to_string()))
            }
            Err(_) => {
                metrics::record_rpc("eth_sendRawTransaction", false);
                Err(GatewayError::Timeout(self.timeout_secs))
            }
        }
    }

    /// Check if the node is reachable.
    pub async fn is_healthy(&self) -> bool {
        self.block_number().await.is_ok()
    }

    async fn rpc<T, F>(&self, method: &'static str, fut: F) -> GatewayResult<T>
    where
        F: std::future::IntoFuture<
            Output = Result<T, RpcError<alloy::transports::TransportErrorKind>>,
        >,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(value)) => {
                metrics::record_rpc(method, true);
                Ok(value)
            }
            Ok(Err(e)) => {
                metrics::record_rpc(method, false);
                Err(GatewayError::Rpc(format!("{}: {}", method, e)))
            }
            Err(_) => {
                metrics::record_rpc(method, false);
                Err(GatewayError::Timeout(self.timeout_secs))
            }
        }
    }
}

impl std::fmt::Debug for NodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeClient")
            .field("rpc_url", &self.rpc_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChainConfig;

    fn test_config() -> ChainConfig {
        ChainConfig {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 31337,
            rpc_timeout_secs: 5,
            verify_chain_id: false,
            ..ChainConfig::default()
        }
    }

    #[tokio::test]
    async fn test_connect_without_verification_is_offline() {
        // With verification disabled, creation touches no network
        let client = NodeClient::connect(&test_config()).await;
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_rejected() {
        let mut config = test_config();
        config.rpc_url = "not a url".to_string();
        let result = NodeClient::connect(&config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid RPC URL"));
    }
}
