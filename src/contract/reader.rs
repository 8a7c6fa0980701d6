//! Read-only call execution.

use alloy::network::TransactionBuilder;
use alloy::rpc::types::TransactionRequest;
use serde_json::Value;

use crate::blockchain::NodeClient;
use crate::contract::binding::ContractBinding;
use crate::error::GatewayResult;

/// Executes read-only contract calls against the node's latest state.
///
/// Side-effect free and idempotent: the same call against unchanged chain
/// state decodes to the same result on every invocation. Unknown function
/// names and malformed arguments fail before any network I/O.
#[derive(Debug, Clone)]
pub struct Reader {
    client: NodeClient,
}

impl Reader {
    pub fn new(client: NodeClient) -> Self {
        Self { client }
    }

    /// Encode, execute via `eth_call`, and decode the typed result.
    pub async fn read(
        &self,
        binding: &ContractBinding,
        function: &str,
        args: &[Value],
    ) -> GatewayResult<Vec<Value>> {
        let data = binding.encode_call(function, args)?;

        let request = TransactionRequest::default()
            .with_to(binding.address())
            .with_input(data);

        let output = self.client.call(request).await?;

        tracing::debug!(
            contract = %binding.address(),
            function = function,
            returned_bytes = output.len(),
            "Read call executed"
        );

        binding.decode_output(function, &output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChainConfig;
    use crate::error::GatewayError;
    use serde_json::json;

    const ABI: &str = r#"[
        {"type":"function","name":"getValue","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"}
    ]"#;

    async fn offline_reader() -> Reader {
        let config = ChainConfig {
            verify_chain_id: false,
            ..ChainConfig::default()
        };
        Reader::new(NodeClient::connect(&config).await.unwrap())
    }

    #[tokio::test]
    async fn test_unknown_function_fails_before_network() {
        // The client points at nothing routable; an RPC attempt would
        // surface as Rpc/Timeout, not FunctionNotFound.
        let reader = offline_reader().await;
        let binding = ContractBinding::resolve(
            "0x5fbdb2315678afecb367f032d93f642f64180aa3",
            ABI,
        )
        .unwrap();

        let result = reader.read(&binding, "missing", &[]).await;
        assert!(matches!(result, Err(GatewayError::FunctionNotFound(_))));
    }

    #[tokio::test]
    async fn test_argument_mismatch_fails_before_network() {
        let reader = offline_reader().await;
        let binding = ContractBinding::resolve(
            "0x5fbdb2315678afecb367f032d93f642f64180aa3",
            ABI,
        )
        .unwrap();

        let result = reader.read(&binding, "getValue", &[json!(1)]).await;
        assert!(matches!(result, Err(GatewayError::ArgumentMismatch { .. })));
    }
}
