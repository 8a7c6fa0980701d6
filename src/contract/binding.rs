//! Contract binding resolution.
//!
//! A binding is built once from an address and an ABI document: the ABI is
//! parsed up front and every function is indexed by name into a static
//! lookup table. Calling an unknown name is a typed error, not a runtime
//! lookup failure, and is raised before any network I/O.

use std::collections::HashMap;

use alloy::primitives::{Address, Bytes};
use alloy_dyn_abi::{DynSolType, DynSolValue, FunctionExt, JsonAbiExt, Specifier};
use alloy_json_abi::{Function, JsonAbi};
use serde_json::Value;

use crate::contract::value::{coerce_json, to_json};
use crate::error::{GatewayError, GatewayResult};

/// A resolved contract: address plus a name-indexed view of its ABI.
#[derive(Debug, Clone)]
pub struct ContractBinding {
    address: Address,
    functions: HashMap<String, Function>,
    names: Vec<String>,
}

impl ContractBinding {
    /// Resolve a binding from an address string and an ABI JSON document.
    ///
    /// Fails with `Binding` if the address or the ABI is malformed. For
    /// overloaded functions the first ABI entry with a given name wins.
    /// No network call occurs here.
    pub fn resolve(address: &str, abi_json: &str) -> GatewayResult<Self> {
        let address: Address = address
            .parse()
            .map_err(|e| GatewayError::Binding(format!("invalid contract address: {}", e)))?;

        let abi: JsonAbi = serde_json::from_str(abi_json)
            .map_err(|e| GatewayError::Binding(format!("unparseable ABI: {}", e)))?;

        let mut functions = HashMap::new();
        let mut names = Vec::new();
        for function in abi.functions() {
            if !functions.contains_key(&function.name) {
                names.push(function.name.clone());
                functions.insert(function.name.clone(), function.clone());
            }
        }

        Ok(Self {
            address,
            functions,
            names,
        })
    }

    /// The deployed contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Every function name the ABI exposes.
    pub fn function_names(&self) -> &[String] {
        &self.names
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Look up a function by name.
    pub fn function(&self, name: &str) -> GatewayResult<&Function> {
        self.functions
            .get(name)
            .ok_or_else(|| GatewayError::FunctionNotFound(name.to_string()))
    }

    /// Encode a call to `name` with JSON arguments into calldata
    /// (selector plus ABI-encoded arguments).
    pub fn encode_call(&self, name: &str, args: &[Value]) -> GatewayResult<Bytes> {
        let function = self.function(name)?;

        if args.len() != function.inputs.len() {
            return Err(GatewayError::ArgumentMismatch {
                function: name.to_string(),
                reason: format!(
                    "expected {} argument(s), got {}",
                    function.inputs.len(),
                    args.len()
                ),
            });
        }

        let mut values = Vec::with_capacity(args.len());
        for (param, arg) in function.inputs.iter().zip(args) {
            let ty: DynSolType = param.resolve().map_err(|e| {
                GatewayError::Binding(format!(
                    "unresolvable type '{}' for parameter '{}': {}",
                    param.ty, param.name, e
                ))
            })?;
            let value = coerce_json(&ty, arg).map_err(|reason| GatewayError::ArgumentMismatch {
                function: name.to_string(),
                reason: format!("parameter '{}': {}", display_name(&param.name, values.len()), reason),
            })?;
            values.push(value);
        }

        let data = function
            .abi_encode_input(&values)
            .map_err(|e| GatewayError::ArgumentMismatch {
                function: name.to_string(),
                reason: e.to_string(),
            })?;

        Ok(data.into())
    }

    /// Decode the return data of `name` into JSON values.
    pub fn decode_output(&self, name: &str, data: &[u8]) -> GatewayResult<Vec<Value>> {
        let function = self.function(name)?;

        let decoded: Vec<DynSolValue> = function
            .abi_decode_output(data)
            .map_err(|e| GatewayError::Rpc(format!("undecodable return data for {}: {}", name, e)))?;

        Ok(decoded.iter().map(to_json).collect())
    }
}

fn display_name(name: &str, index: usize) -> String {
    if name.trim().is_empty() {
        format!("arg{}", index)
    } else {
        name.to_string()
    }
}
