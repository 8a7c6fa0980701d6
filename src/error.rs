//! Gateway error taxonomy.
//!
//! Every fallible operation in the crate surfaces one of these variants.
//! The split matters at the HTTP boundary: caller mistakes (bad binding,
//! unknown function, malformed arguments) map to 4xx, node-side trouble
//! to 5xx. Raw errors from alloy are classified at the call site, never
//! passed through untyped.

use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The address or ABI document could not be resolved into a binding.
    #[error("contract binding failed: {0}")]
    Binding(String),

    /// The requested function name does not exist in the resolved ABI.
    #[error("function not found: {0}")]
    FunctionNotFound(String),

    /// Argument count or types do not match the function signature.
    #[error("argument mismatch for {function}: {reason}")]
    ArgumentMismatch { function: String, reason: String },

    /// The node executed the call and reported a revert.
    #[error("call reverted: {0}")]
    CallReverted(String),

    /// The node rejected a raw transaction broadcast.
    #[error("broadcast rejected: {0}")]
    Broadcast(String),

    /// No receipt appeared within the polling window.
    #[error("no receipt within {0}s")]
    ReceiptTimeout(u64),

    /// Transport-level RPC failure (connection refused, bad response).
    #[error("rpc error: {0}")]
    Rpc(String),

    /// A single RPC request exceeded its timeout.
    #[error("rpc request exceeded {0}s timeout")]
    Timeout(u64),

    /// Key loading or signing failure. Never carries key material.
    #[error("wallet error: {0}")]
    Wallet(String),
}

impl GatewayError {
    /// True when the error is the caller's fault rather than the node's
    /// or the gateway's. Drives the 4xx/5xx split at the HTTP boundary.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            GatewayError::Binding(_)
                | GatewayError::FunctionNotFound(_)
                | GatewayError::ArgumentMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            GatewayError::FunctionNotFound("getRole".to_string()).to_string(),
            "function not found: getRole"
        );
        assert_eq!(
            GatewayError::ReceiptTimeout(120).to_string(),
            "no receipt within 120s"
        );
        assert_eq!(
            GatewayError::ArgumentMismatch {
                function: "setValue".to_string(),
                reason: "expected 1 argument(s), got 2".to_string(),
            }
            .to_string(),
            "argument mismatch for setValue: expected 1 argument(s), got 2"
        );
    }

    #[test]
    fn test_caller_error_classification() {
        assert!(GatewayError::Binding("bad abi".to_string()).is_caller_error());
        assert!(GatewayError::FunctionNotFound("x".to_string()).is_caller_error());
        assert!(GatewayError::ArgumentMismatch {
            function: "f".to_string(),
            reason: "r".to_string(),
        }
        .is_caller_error());

        assert!(!GatewayError::CallReverted("revert".to_string()).is_caller_error());
        assert!(!GatewayError::Broadcast("nonce too low".to_string()).is_caller_error());
        assert!(!GatewayError::Rpc("refused".to_string()).is_caller_error());
        assert!(!GatewayError::Timeout(10).is_caller_error());
        assert!(!GatewayError::ReceiptTimeout(120).is_caller_error());
        assert!(!GatewayError::Wallet("no key".to_string()).is_caller_error());
    }
}
