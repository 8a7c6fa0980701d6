//! State-changing call execution.
//!
//! The transaction lifecycle is an explicit progression of owned values:
//!
//! ```text
//! prepare() -> BuiltTx -> sign() -> SignedTx -> submit() -> TxHash
//!                                   wait_for_receipt() -> Confirmed | Reverted
//! ```
//!
//! Each transition consumes its input, so an envelope cannot be signed
//! twice and signed bytes cannot be altered before broadcast. No step is
//! retried; any failure aborts the whole operation and is surfaced
//! verbatim.

use alloy::eips::eip2718::Encodable2718;
use alloy::network::TransactionBuilder;
use alloy::primitives::{keccak256, Bytes, TxHash};
use alloy::rpc::types::TransactionRequest;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::blockchain::{NodeClient, Wallet};
use crate::config::ChainConfig;
use crate::contract::binding::ContractBinding;
use crate::error::{GatewayError, GatewayResult};

/// A fully assembled transaction envelope, not yet signed.
#[derive(Debug, Clone)]
pub struct BuiltTx {
    function: String,
    request: TransactionRequest,
}

impl BuiltTx {
    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn nonce(&self) -> Option<u64> {
        self.request.nonce
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.request.chain_id
    }

    pub fn gas_price(&self) -> Option<u128> {
        self.request.gas_price
    }

    pub fn calldata(&self) -> Option<&Bytes> {
        self.request.input.input()
    }
}

/// Signed raw transaction bytes. Immutable once produced.
#[derive(Debug, Clone)]
pub struct SignedTx {
    function: String,
    hash: TxHash,
    raw: Bytes,
}

impl SignedTx {
    /// Hash of the signed transaction (keccak of the raw encoding).
    pub fn hash(&self) -> TxHash {
        self.hash
    }

    pub fn raw(&self) -> &Bytes {
        &self.raw
    }
}

/// Terminal outcome of a confirmed-or-reverted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TxOutcome {
    Confirmed {
        transaction_hash: TxHash,
        block_number: u64,
    },
    Reverted {
        transaction_hash: TxHash,
    },
}

/// Executes the build / sign / broadcast / poll lifecycle.
#[derive(Debug, Clone)]
pub struct Writer {
    client: NodeClient,
    wallet: Wallet,
    gas_limit: u64,
    receipt_timeout_secs: u64,
    receipt_poll_ms: u64,
}

impl Writer {
    pub fn new(client: NodeClient, wallet: Wallet, config: &ChainConfig) -> Self {
        Self {
            client,
            wallet,
            gas_limit: config.gas_limit,
            receipt_timeout_secs: config.receipt_timeout_secs,
            receipt_poll_ms: config.receipt_poll_ms,
        }
    }

    /// The signer address transactions will originate from.
    pub fn address(&self) -> alloy::primitives::Address {
        self.wallet.address()
    }

    /// Encode the call and assemble the envelope.
    ///
    /// Nonce, gas price, and chain id are fetched fresh from the node on
    /// every invocation; nothing is tracked locally. Two concurrent
    /// prepares from the same signer can observe the same nonce, in which
    /// case the node will accept only one of the resulting broadcasts.
    /// The gas limit is the configured fixed ceiling; no estimation.
    pub async fn prepare(
        &self,
        binding: &ContractBinding,
        function: &str,
        args: &[Value],
    ) -> GatewayResult<BuiltTx> {
        let data = binding.encode_call(function, args)?;

        let nonce = self.client.transaction_count(self.wallet.address()).await?;
        let gas_price = self.client.gas_price().await?;
        let chain_id = self.client.chain_id().await?;

        let request = TransactionRequest::default()
            .with_to(binding.address())
            .with_input(data)
            .with_nonce(nonce)
            .with_gas_price(gas_price)
            .with_chain_id(chain_id)
            .with_gas_limit(self.gas_limit);

        tracing::debug!(
            contract = %binding.address(),
            function = function,
            nonce = nonce,
            gas_price = gas_price,
            "Transaction built"
        );

        Ok(BuiltTx {
            function: function.to_string(),
            request,
        })
    }

    /// Sign the envelope. Consumes it; signing is deterministic, so an
    /// identical envelope always yields byte-identical output.
    pub async fn sign(&self, built: BuiltTx) -> GatewayResult<SignedTx> {
        let envelope = built
            .request
            .build(self.wallet.network_wallet())
            .await
            .map_err(|e| GatewayError::Wallet(format!("signing failed: {}", e)))?;

        let raw = envelope.encoded_2718();
        let hash = TxHash::from(keccak256(&raw));

        Ok(SignedTx {
            function: built.function,
            hash,
            raw: raw.into(),
        })
    }

    /// Broadcast the raw bytes. Consumes the signed transaction; the
    /// node-assigned hash is the terminal value for fire-and-forget use.
    pub async fn submit(&self, signed: SignedTx) -> GatewayResult<TxHash> {
        let hash = self.client.send_raw_transaction(&signed.raw).await?;

        tracing::info!(
            function = %signed.function,
            transaction_hash = %hash,
            "Transaction submitted"
        );

        Ok(hash)
    }

    /// Run the full lifecycle without waiting for inclusion.
    pub async fn execute(
        &self,
        binding: &ContractBinding,
        function: &str,
        args: &[Value],
    ) -> GatewayResult<TxHash> {
        let built = self.prepare(binding, function, args).await?;
        let signed = self.sign(built).await?;
        self.submit(signed).await
    }

    /// Poll for a receipt until it appears or the window expires.
    ///
    /// The receipt's status bit decides between `Confirmed` and
    /// `Reverted`; interpretation beyond that is up to the caller.
    pub async fn wait_for_receipt(&self, tx_hash: TxHash) -> GatewayResult<TxOutcome> {
        let poll_interval = Duration::from_millis(self.receipt_poll_ms);
        let window = Duration::from_secs(self.receipt_timeout_secs);

        let result = timeout(window, async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                let receipt = match self.client.transaction_receipt(tx_hash).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(transaction_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Ok(TxOutcome::Reverted {
                        transaction_hash: tx_hash,
                    });
                }

                let block_number = match receipt.block_number {
                    Some(n) => n,
                    None => self.client.block_number().await?,
                };
                return Ok(TxOutcome::Confirmed {
                    transaction_hash: tx_hash,
                    block_number,
                });
            }
        })
        .await;

        match result {
            Ok(outcome) => outcome,
            Err(_) => Err(GatewayError::ReceiptTimeout(self.receipt_timeout_secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const ADDRESS: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";
    const ABI: &str = r#"[
        {"type":"function","name":"setValue","inputs":[{"name":"value","type":"uint256"}],"outputs":[],"stateMutability":"nonpayable"}
    ]"#;

    async fn offline_writer() -> Writer {
        let config = ChainConfig {
            verify_chain_id: false,
            ..ChainConfig::default()
        };
        let client = NodeClient::connect(&config).await.unwrap();
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        Writer::new(client, wallet, &config)
    }

    fn fixed_envelope(binding: &ContractBinding) -> BuiltTx {
        let data = binding.encode_call("setValue", &[json!(7)]).unwrap();
        let request = TransactionRequest::default()
            .with_to(binding.address())
            .with_input(data)
            .with_nonce(5)
            .with_gas_price(50_000_000_000u128)
            .with_chain_id(1)
            .with_gas_limit(2_000_000);
        BuiltTx {
            function: "setValue".to_string(),
            request,
        }
    }

    #[tokio::test]
    async fn test_prepare_rejects_unknown_function_before_network() {
        let writer = offline_writer().await;
        let binding = ContractBinding::resolve(ADDRESS, ABI).unwrap();

        let result = writer.prepare(&binding, "destroy", &[]).await;
        assert!(matches!(result, Err(GatewayError::FunctionNotFound(_))));
    }

    #[tokio::test]
    async fn test_signing_is_deterministic() {
        let writer = offline_writer().await;
        let binding = ContractBinding::resolve(ADDRESS, ABI).unwrap();

        let first = writer.sign(fixed_envelope(&binding)).await.unwrap();
        let second = writer.sign(fixed_envelope(&binding)).await.unwrap();

        assert_eq!(first.raw(), second.raw());
        assert_eq!(first.hash(), second.hash());
    }

    #[tokio::test]
    async fn test_signed_hash_matches_raw_bytes() {
        let writer = offline_writer().await;
        let binding = ContractBinding::resolve(ADDRESS, ABI).unwrap();

        let signed = writer.sign(fixed_envelope(&binding)).await.unwrap();
        assert!(!signed.raw().is_empty());
        assert_eq!(signed.hash(), TxHash::from(keccak256(signed.raw())));
    }

    #[tokio::test]
    async fn test_built_envelope_accessors() {
        let binding = ContractBinding::resolve(ADDRESS, ABI).unwrap();
        let built = fixed_envelope(&binding);

        assert_eq!(built.function(), "setValue");
        assert_eq!(built.nonce(), Some(5));
        assert_eq!(built.chain_id(), Some(1));
        assert_eq!(built.gas_price(), Some(50_000_000_000));
        assert_eq!(built.calldata().map(|d| d.len()), Some(36));
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = TxOutcome::Reverted {
            transaction_hash: TxHash::ZERO,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "reverted");
    }
}
