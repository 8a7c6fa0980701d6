//! JSON API handlers.
//!
//! Each handler is a thin adapter: deserialize the request, resolve a
//! binding, run exactly one read or write through the core, and render
//! the result or the error. Nothing else happens here.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::contract::{ContractBinding, TxOutcome};
use crate::error::GatewayError;
use crate::facade::{OpResult, OperationSpec, UniversityFacade};
use crate::http::server::AppState;

/// JSON error envelope with a status code derived from the taxonomy:
/// caller mistakes are 400, reverts 422, node trouble 502, timeouts 504.
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            e if e.is_caller_error() => StatusCode::BAD_REQUEST,
            GatewayError::CallReverted(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::ReceiptTimeout(_) | GatewayError::Timeout(_) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            _ => StatusCode::BAD_GATEWAY,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Generic gateway request: target a contract by address + ABI.
#[derive(Debug, Deserialize)]
pub struct ContractRequest {
    pub address: String,
    /// ABI document, either inline JSON or a JSON-encoded string.
    pub abi: Value,
    #[serde(default)]
    pub function: String,
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub wait: bool,
}

impl ContractRequest {
    pub fn resolve_binding(&self) -> Result<ContractBinding, GatewayError> {
        let abi_json = match &self.abi {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        ContractBinding::resolve(&self.address, &abi_json)
    }
}

#[derive(Debug, Serialize)]
pub struct CallResponse {
    pub result: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub transaction_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<TxOutcome>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Response {
    match state.client.block_number().await {
        Ok(block_number) => Json(HealthResponse {
            status: "ok",
            block_number: Some(block_number),
        })
        .into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unreachable", "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// POST /contracts/functions
pub async fn list_functions(
    Json(request): Json<ContractRequest>,
) -> Result<Json<Vec<String>>, ApiError> {
    let binding = request.resolve_binding()?;
    Ok(Json(binding.function_names().to_vec()))
}

/// POST /contracts/call
pub async fn call_function(
    State(state): State<AppState>,
    Json(request): Json<ContractRequest>,
) -> Result<Json<CallResponse>, ApiError> {
    let binding = request.resolve_binding()?;
    let result = state
        .reader
        .read(&binding, &request.function, &request.args)
        .await?;
    Ok(Json(CallResponse { result }))
}

/// POST /contracts/send
pub async fn send_transaction(
    State(state): State<AppState>,
    Json(request): Json<ContractRequest>,
) -> Result<Json<SendResponse>, ApiError> {
    let binding = request.resolve_binding()?;
    let hash = state
        .writer
        .execute(&binding, &request.function, &request.args)
        .await?;
    let outcome = if request.wait {
        Some(state.writer.wait_for_receipt(hash).await?)
    } else {
        None
    };
    Ok(Json(SendResponse {
        transaction_hash: format!("{}", hash),
        outcome,
    }))
}

/// GET /ops
pub async fn list_operations() -> Json<&'static [OperationSpec]> {
    Json(UniversityFacade::operations())
}

#[derive(Debug, Deserialize, Default)]
pub struct OpRequest {
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub wait: bool,
}

/// POST /ops/{name}
pub async fn invoke_operation(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<OpRequest>,
) -> Result<Json<OpResult>, ApiError> {
    let result = state
        .facade
        .invoke(&name, &request.args, request.wait)
        .await?;
    Ok(Json(result))
}
