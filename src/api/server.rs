//! API Server Module
//!
//! A JSON-RPC server with a single POST endpoint. Each request carries a JSON
//! described transaction which is validated in full and answered with a verdict.
//!
//! Methods:
//! - `validateExtension`: `{ transaction, is_owner_mode, extension_index, args }` -> `Verdict`
//! - `validateOwner`: `{ transaction }` -> `Verdict`
//! - `classifyAction`: `{ transaction }` -> `{ action }`

use crate::{
    Verdict,
    config::Config,
    tx::MockTransaction,
    validation::{ExtensionContext, Validator},
};
use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

/// Shared application state that is accessible across all request handlers
///
/// Validation is a pure function of the submitted transaction, so the
/// validator is the only shared component.
#[derive(Clone)]
pub struct AppState {
    validator: Arc<Validator>,
}

/// The main API server struct
pub struct Server {
    config: Config,
    state: AppState,
}

impl Server {
    /// Creates a new API server instance
    ///
    /// # Arguments
    /// * `config` - Service configuration (network and listen address)
    ///
    /// # Returns
    /// * `Err` if the configured config cell type id is not valid hex
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let config_cell_type_id = config.network.config_cell_type_id()?;
        info!(
            network = ?config.network.kind,
            config_cell_type_id = %hex::encode(config_cell_type_id),
            "validator configured"
        );

        let state = AppState {
            validator: Arc::new(Validator::new(config_cell_type_id)),
        };
        Ok(Self { config, state })
    }

    /// Router with the JSON-RPC endpoint at "/"
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", post(handle_rpc))
            .with_state(self.state.clone())
    }

    /// Starts the API server and begins listening for incoming requests
    ///
    /// # Returns
    /// `Ok(())` when the server shuts down, or an error if binding fails
    pub async fn start(self) -> anyhow::Result<()> {
        let app = self.router();

        let addr = format!("{}:{}", self.config.api.host, self.config.api.port);
        info!("API server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// JSON-RPC 2.0 request structure
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    method: String,
    #[serde(default)]
    params: Value,
    id: Value,
}

/// JSON-RPC 2.0 response structure
///
/// Either `result` or `error` is populated, never both.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
    id: Value,
}

/// JSON-RPC error object
#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

impl JsonRpcResponse {
    fn success<T: Serialize>(id: Value, result: &T) -> Self {
        match serde_json::to_value(result) {
            Ok(value) => Self {
                jsonrpc: "2.0".to_string(),
                result: Some(value),
                error: None,
                id,
            },
            Err(e) => {
                error!("Failed to serialize result: {}", e);
                Self::failure(id, INTERNAL_ERROR, "Internal error".to_string())
            }
        }
    }

    fn failure(id: Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError { code, message }),
            id,
        }
    }
}

/// Params of `validateExtension`
#[derive(Debug, Deserialize)]
struct ExtensionParams {
    transaction: MockTransaction,
    #[serde(default)]
    is_owner_mode: bool,
    #[serde(default)]
    extension_index: usize,
    /// Hex token id, with or without `0x`
    args: String,
}

/// Params of `validateOwner` and `classifyAction`
#[derive(Debug, Deserialize)]
struct TransactionParams {
    transaction: MockTransaction,
}

#[derive(Debug, Serialize)]
struct ActionResult {
    action: String,
}

/// Main RPC request handler
///
/// Routes the request to the appropriate handler based on the method name.
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> Json<JsonRpcResponse> {
    info!("Received RPC request: {}", request.method);

    let response = match request.method.as_str() {
        "validateExtension" => handle_validate_extension(&state, request),
        "validateOwner" => handle_validate_owner(&state, request),
        "classifyAction" => handle_classify_action(&state, request),
        _ => JsonRpcResponse::failure(request.id, METHOD_NOT_FOUND, "Method not found".to_string()),
    };
    Json(response)
}

/// Deserializes the params, or produces the invalid params response.
fn parse_params<T: DeserializeOwned>(request: &JsonRpcRequest) -> Result<T, JsonRpcResponse> {
    serde_json::from_value(request.params.clone()).map_err(|e| {
        warn!("Invalid params for {}: {}", request.method, e);
        JsonRpcResponse::failure(request.id.clone(), INVALID_PARAMS, format!("Invalid params: {}", e))
    })
}

fn handle_validate_extension(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let params: ExtensionParams = match parse_params(&request) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let args = match hex::decode(params.args.strip_prefix("0x").unwrap_or(&params.args)) {
        Ok(args) => args,
        Err(e) => {
            warn!("Invalid extension args: {}", e);
            return JsonRpcResponse::failure(request.id, INVALID_PARAMS, format!("Invalid params: args {}", e));
        }
    };

    let context = ExtensionContext {
        is_owner_mode: params.is_owner_mode,
        extension_index: params.extension_index,
        args: &args,
    };
    let result = state.validator.validate_extension(&params.transaction, &context);
    let verdict = Verdict::from_result(&result);
    log_verdict("validateExtension", &verdict);
    JsonRpcResponse::success(request.id, &verdict)
}

fn handle_validate_owner(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let params: TransactionParams = match parse_params(&request) {
        Ok(params) => params,
        Err(response) => return response,
    };

    let result = state.validator.validate_owner(&params.transaction);
    let verdict = Verdict::from_result(&result);
    log_verdict("validateOwner", &verdict);
    JsonRpcResponse::success(request.id, &verdict)
}

fn handle_classify_action(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let params: TransactionParams = match parse_params(&request) {
        Ok(params) => params,
        Err(response) => return response,
    };

    let action = state.validator.classify_action(&params.transaction);
    info!("Transaction classified as {}", action);
    JsonRpcResponse::success(
        request.id,
        &ActionResult {
            action: action.name().to_string(),
        },
    )
}

fn log_verdict(method: &str, verdict: &Verdict) {
    if verdict.accepted {
        info!("{}: transaction accepted", method);
    } else {
        warn!(
            "{}: transaction rejected with code {}: {}",
            method,
            verdict.code,
            verdict.reason.as_deref().unwrap_or_default()
        );
    }
}
