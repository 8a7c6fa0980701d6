//! Conversion between JSON values and ABI-typed Solidity values.
//!
//! Front-ends hand arguments over as JSON (or plain strings); the ABI
//! entry tells us the target Solidity type. Decoded call outputs travel
//! the other way, back to JSON for rendering.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use serde_json::Value;

/// Coerce a JSON value into the given Solidity type.
///
/// Strings go through alloy's string coercion (handles addresses, hex
/// bytes, decimal and 0x-prefixed integers); numbers and booleans are
/// matched directly; arrays and tuples recurse element-wise.
pub fn coerce_json(ty: &DynSolType, value: &Value) -> Result<DynSolValue, String> {
    match value {
        Value::String(s) => ty
            .coerce_str(s)
            .map_err(|e| format!("cannot parse '{}' as {}: {}", s, ty, e)),
        Value::Bool(b) => match ty {
            DynSolType::Bool => Ok(DynSolValue::Bool(*b)),
            other => Err(format!("got a boolean where {} was expected", other)),
        },
        Value::Number(n) => ty
            .coerce_str(&n.to_string())
            .map_err(|e| format!("cannot parse '{}' as {}: {}", n, ty, e)),
        Value::Array(items) => coerce_sequence(ty, items),
        Value::Null => Err(format!("null is not a valid {}", ty)),
        Value::Object(_) => Err(format!("objects are not valid {} values", ty)),
    }
}

fn coerce_sequence(ty: &DynSolType, items: &[Value]) -> Result<DynSolValue, String> {
    match ty {
        DynSolType::Array(inner) => {
            let values = items
                .iter()
                .map(|item| coerce_json(inner, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(DynSolValue::Array(values))
        }
        DynSolType::FixedArray(inner, size) => {
            if items.len() != *size {
                return Err(format!("expected {} elements, got {}", size, items.len()));
            }
            let values = items
                .iter()
                .map(|item| coerce_json(inner, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(DynSolValue::FixedArray(values))
        }
        DynSolType::Tuple(fields) => {
            if items.len() != fields.len() {
                return Err(format!(
                    "expected {} tuple fields, got {}",
                    fields.len(),
                    items.len()
                ));
            }
            let values = fields
                .iter()
                .zip(items)
                .map(|(field_ty, item)| coerce_json(field_ty, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(DynSolValue::Tuple(values))
        }
        other => Err(format!("got an array where {} was expected", other)),
    }
}

/// Render a decoded Solidity value as JSON.
///
/// Integers that fit in a JSON number stay numeric; larger ones become
/// decimal strings so nothing is silently truncated.
pub fn to_json(value: &DynSolValue) -> Value {
    match value {
        DynSolValue::Bool(b) => Value::Bool(*b),
        DynSolValue::Uint(u, _) => match u64::try_from(*u) {
            Ok(small) => Value::from(small),
            Err(_) => Value::String(u.to_string()),
        },
        DynSolValue::Int(i, _) => match i64::try_from(*i) {
            Ok(small) => Value::from(small),
            Err(_) => Value::String(i.to_string()),
        },
        DynSolValue::Address(addr) => Value::String(format!("{}", addr)),
        DynSolValue::FixedBytes(word, size) => {
            let bytes = &word.as_slice()[..(*size).min(32)];
            Value::String(format!("0x{}", hex::encode(bytes)))
        }
        DynSolValue::Function(func) => Value::String(format!("0x{}", hex::encode(func.as_slice()))),
        DynSolValue::Bytes(bytes) => Value::String(format!("0x{}", hex::encode(bytes))),
        DynSolValue::String(s) => Value::String(s.clone()),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            Value::Array(items.iter().map(to_json).collect())
        }
        DynSolValue::Tuple(fields) => Value::Array(fields.iter().map(to_json).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, U256};
    use serde_json::json;

    #[test]
    fn test_coerce_uint_from_number_and_string() {
        let ty = DynSolType::Uint(256);
        assert_eq!(
            coerce_json(&ty, &json!(42)).unwrap(),
            DynSolValue::Uint(U256::from(42), 256)
        );
        assert_eq!(
            coerce_json(&ty, &json!("42")).unwrap(),
            DynSolValue::Uint(U256::from(42), 256)
        );
    }

    #[test]
    fn test_coerce_address() {
        let ty = DynSolType::Address;
        let value = coerce_json(&ty, &json!("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266")).unwrap();
        assert!(matches!(value, DynSolValue::Address(_)));
    }

    #[test]
    fn test_coerce_bool() {
        let ty = DynSolType::Bool;
        assert_eq!(coerce_json(&ty, &json!(true)).unwrap(), DynSolValue::Bool(true));
        assert_eq!(coerce_json(&ty, &json!("false")).unwrap(), DynSolValue::Bool(false));
    }

    #[test]
    fn test_coerce_array() {
        let ty = DynSolType::Array(Box::new(DynSolType::Uint(256)));
        let value = coerce_json(&ty, &json!([1, 2, 3])).unwrap();
        match value {
            DynSolValue::Array(items) => assert_eq!(items.len(), 3),
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn test_coerce_rejects_wrong_shape() {
        let ty = DynSolType::Uint(256);
        assert!(coerce_json(&ty, &json!([1])).is_err());
        assert!(coerce_json(&ty, &json!(null)).is_err());
        assert!(coerce_json(&ty, &json!("not a number")).is_err());
    }

    #[test]
    fn test_fixed_array_length_checked() {
        let ty = DynSolType::FixedArray(Box::new(DynSolType::Uint(8)), 2);
        assert!(coerce_json(&ty, &json!([1, 2])).is_ok());
        assert!(coerce_json(&ty, &json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_small_uint_renders_numeric() {
        let value = DynSolValue::Uint(U256::from(42), 256);
        assert_eq!(to_json(&value), json!(42));
    }

    #[test]
    fn test_large_uint_renders_as_string() {
        let value = DynSolValue::Uint(U256::MAX, 256);
        assert_eq!(to_json(&value), json!(U256::MAX.to_string()));
    }

    #[test]
    fn test_address_round_trips_through_json() {
        let addr: Address = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".parse().unwrap();
        let rendered = to_json(&DynSolValue::Address(addr));
        let back = coerce_json(&DynSolType::Address, &rendered).unwrap();
        assert_eq!(back, DynSolValue::Address(addr));
    }
}
