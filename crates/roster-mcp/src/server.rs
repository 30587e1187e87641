// crates/roster-mcp/src/server.rs
// ============================================================================
// Module: MCP Server
// Description: JSON-RPC 2.0 dispatch and HTTP transport for Roster tools.
// Purpose: Expose the tool router over a single HTTP endpoint.
// Dependencies: roster-config, roster-contract, roster-core, axum, tokio
// ============================================================================

//! ## Overview
//! One HTTP endpoint accepts JSON-RPC 2.0 envelopes for `initialize`,
//! `tools/list`, and `tools/call` and routes invocations through
//! [`crate::tools::ToolRouter`]. Every RPC response is HTTP 200 with a
//! JSON-RPC body; transport status codes never signal RPC failures. The
//! endpoint answers CORS preflight, refuses other verbs with a
//! JSON-RPC-shaped error, echoes the effective credential when configured
//! to, and emits one audit event per request. A separate liveness endpoint
//! reports a fixed healthy payload.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::ConnectInfo;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::routing::post;
use roster_config::AuditConfig;
use roster_config::RosterConfig;
use roster_contract::ToolDefinition;
use roster_contract::tool_contracts;
use roster_core::InMemoryDirectoryStore;
use roster_core::SharedDirectoryStore;
use roster_core::ToolName;
use roster_core::parse_scopes;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::audit::AuditSink;
use crate::audit::CredentialAuditEvent;
use crate::audit::CredentialAuditEventParams;
use crate::audit::FileAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::RpcAuditEvent;
use crate::audit::RpcAuditEventParams;
use crate::audit::RpcMethod;
use crate::audit::RpcOutcome;
use crate::audit::StderrAuditSink;
use crate::auth::ACTOR_CHAIN_HEADER;
use crate::auth::Credential;
use crate::auth::ENVELOPE_HEADER;
use crate::auth::RequestIdentity;
use crate::auth::SCOPES_HEADER;
use crate::auth::SUBJECT_HEADER;
use crate::auth::ScopeGate;
use crate::auth::extract_credential;
use crate::tools::ToolError;
use crate::tools::ToolRouter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// MCP protocol version advertised by `initialize`.
const PROTOCOL_VERSION: &str = "2024-11-05";
/// Service name advertised by `initialize` and the health endpoint.
const SERVICE_NAME: &str = "roster-mcp";
/// Response header echoing the effective credential.
const ECHO_HEADER: &str = "x-mcp-token";
/// CORS allowed-origin header value.
const CORS_ALLOW_ORIGIN: &str = "*";
/// CORS allowed-methods header value.
const CORS_ALLOW_METHODS: &str = "POST, OPTIONS";
/// CORS allowed-headers header value.
const CORS_ALLOW_HEADERS: &str =
    "Content-Type, X-User-Scopes, X-User-Sub, X-Actor-Chain, Authorization, x-introspection-token";

// ============================================================================
// SECTION: MCP Server
// ============================================================================

/// MCP server instance.
pub struct McpServer {
    /// Server configuration.
    config: RosterConfig,
    /// Shared handler state.
    state: Arc<ServerState>,
}

impl McpServer {
    /// Builds a server from configuration over a freshly seeded store.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the configuration is invalid or the
    /// audit sink cannot be opened.
    pub fn from_config(config: RosterConfig) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let audit = build_audit_sink(&config.audit)?;
        let store = SharedDirectoryStore::from_store(InMemoryDirectoryStore::seeded());
        let router = ToolRouter::new(
            store,
            Arc::new(tool_contracts()),
            ScopeGate::from_config(&config.scopes),
        );
        let state = Arc::new(ServerState {
            router,
            audit,
            max_body_bytes: config.server.max_body_bytes,
            echo_credential: config.server.echo_credential,
        });
        Ok(Self {
            config,
            state,
        })
    }

    /// Serves requests until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr =
            self.config.server.bind_addr().map_err(|err| ServerError::Config(err.to_string()))?;
        let app = app(Arc::clone(&self.state));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|_| ServerError::Transport("http bind failed".to_string()))?;
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .map_err(|_| ServerError::Transport("http server failed".to_string()))
    }
}

/// Builds the audit sink selected by configuration.
fn build_audit_sink(config: &AuditConfig) -> Result<Arc<dyn AuditSink>, ServerError> {
    if !config.enabled {
        return Ok(Arc::new(NoopAuditSink));
    }
    match config.path.as_deref() {
        Some(path) => {
            let sink = FileAuditSink::new(Path::new(path))
                .map_err(|err| ServerError::Init(format!("audit log open failed: {err}")))?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(StderrAuditSink)),
    }
}

/// Shared state for HTTP handlers.
struct ServerState {
    /// Tool router for request dispatch.
    router: ToolRouter,
    /// Audit sink for request events.
    audit: Arc<dyn AuditSink>,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
    /// Whether to echo the effective credential header.
    echo_credential: bool,
}

/// Builds the HTTP application router.
fn app(state: Arc<ServerState>) -> Router {
    Router::new()
        .route(
            "/mcp",
            post(handle_rpc).options(handle_preflight).fallback(handle_method_not_allowed),
        )
        .route("/health", get(handle_health))
        .with_state(state)
}

// ============================================================================
// SECTION: HTTP Handlers
// ============================================================================

/// Handles JSON-RPC requests on the MCP endpoint.
async fn handle_rpc(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    bytes: Bytes,
) -> impl IntoResponse {
    let identity = extract_identity(&state, &headers, peer);
    let report = dispatch(&state, &identity, &bytes);
    record_rpc_event(&state, &identity, peer, &report, bytes.len());
    let response_headers = response_headers(&state, &identity.credential);
    (StatusCode::OK, response_headers, Json(report.response))
}

/// Answers CORS preflight requests with an empty 200.
async fn handle_preflight() -> impl IntoResponse {
    (StatusCode::OK, cors_headers())
}

/// Refuses non-POST verbs with a JSON-RPC-shaped error.
async fn handle_method_not_allowed(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let identity = extract_identity(&state, &headers, peer);
    let report = report_error(
        Value::Null,
        -32600,
        "Method not allowed".to_string(),
        RpcMethod::Invalid,
        None,
    );
    record_rpc_event(&state, &identity, peer, &report, 0);
    let response_headers = response_headers(&state, &identity.credential);
    (StatusCode::OK, response_headers, Json(report.response))
}

/// Reports process liveness with no dependency checks.
async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}

// ============================================================================
// SECTION: Identity and Headers
// ============================================================================

/// Assembles the caller identity from trust headers and audits the
/// credential extraction.
fn extract_identity(state: &ServerState, headers: &HeaderMap, peer: SocketAddr) -> RequestIdentity {
    let envelope = header_str(headers, ENVELOPE_HEADER);
    let authorization = headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok());
    let extraction = extract_credential(envelope, authorization);
    state.audit.record_credential(&CredentialAuditEvent::new(CredentialAuditEventParams {
        peer_ip: Some(peer.ip().to_string()),
        provenance: extraction.credential.provenance,
        outcome: extraction.outcome,
        detail: extraction.detail,
    }));
    RequestIdentity {
        subject: header_string(headers, SUBJECT_HEADER),
        scopes: header_str(headers, SCOPES_HEADER).map(parse_scopes).unwrap_or_default(),
        actor_chain: header_string(headers, ACTOR_CHAIN_HEADER),
        credential: extraction.credential,
    }
}

/// Reads a header value as UTF-8, treating non-UTF-8 values as absent.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Reads a header value as an owned string.
fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    header_str(headers, name).map(str::to_string)
}

/// Builds the CORS headers attached to every MCP endpoint response.
fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("access-control-allow-origin", HeaderValue::from_static(CORS_ALLOW_ORIGIN));
    headers.insert("access-control-allow-methods", HeaderValue::from_static(CORS_ALLOW_METHODS));
    headers.insert("access-control-allow-headers", HeaderValue::from_static(CORS_ALLOW_HEADERS));
    headers
}

/// Builds the response headers for an RPC response, echoing the effective
/// credential when configured and present.
fn response_headers(state: &ServerState, credential: &Credential) -> HeaderMap {
    let mut headers = cors_headers();
    if state.echo_credential
        && !credential.is_empty()
        && let Ok(value) = HeaderValue::from_str(&credential.value)
    {
        headers.insert(ECHO_HEADER, value);
    }
    headers
}

// ============================================================================
// SECTION: JSON-RPC Handling
// ============================================================================

/// Incoming JSON-RPC request payload.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// JSON-RPC protocol version.
    #[serde(default)]
    jsonrpc: String,
    /// Request identifier; null when omitted.
    #[serde(default)]
    id: Value,
    /// Method name.
    #[serde(default)]
    method: String,
    /// Optional parameters payload.
    #[serde(default)]
    params: Option<Value>,
}

/// JSON-RPC response envelope.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    /// JSON-RPC protocol version.
    jsonrpc: &'static str,
    /// Request identifier.
    id: Value,
    /// Successful result payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    /// Error payload when the request fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error payload.
#[derive(Debug, Serialize)]
struct JsonRpcError {
    /// Error code.
    code: i64,
    /// Human-readable error message.
    message: String,
}

/// Tool call parameters for `tools/call`.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    /// Tool name.
    name: String,
    /// Raw JSON arguments.
    arguments: Option<Value>,
}

/// Tool list response payload.
#[derive(Debug, Serialize)]
struct ToolListResult {
    /// Registered tool definitions.
    tools: Vec<ToolDefinition>,
}

/// Tool call response payload.
#[derive(Debug, Serialize)]
struct ToolCallResult {
    /// Tool output content blocks.
    content: Vec<ToolContent>,
}

/// Tool output payloads for JSON-RPC responses.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ToolContent {
    /// JSON-serialized tool output.
    Text {
        /// Compact JSON text.
        text: String,
    },
}

/// `initialize` result payload.
#[derive(Debug, Serialize)]
struct InitializeResult {
    /// Advertised MCP protocol version.
    #[serde(rename = "protocolVersion")]
    protocol_version: &'static str,
    /// Advertised capability set.
    capabilities: Capabilities,
    /// Server identity descriptor.
    #[serde(rename = "serverInfo")]
    server_info: ServerInfo,
}

/// Capability descriptor advertised by `initialize`.
#[derive(Debug, Serialize)]
struct Capabilities {
    /// Tool capability marker.
    tools: EmptyCapability,
}

/// Empty capability marker object.
#[derive(Debug, Serialize)]
struct EmptyCapability {}

/// Server identity descriptor.
#[derive(Debug, Serialize)]
struct ServerInfo {
    /// Service name.
    name: &'static str,
    /// Crate version.
    version: &'static str,
}

/// Health endpoint payload.
#[derive(Debug, Serialize)]
struct HealthResponse {
    /// Fixed liveness status.
    status: &'static str,
    /// Service name.
    service: &'static str,
}

/// Outcome of one dispatched request for response and audit assembly.
struct RpcReport {
    /// JSON-RPC response payload.
    response: JsonRpcResponse,
    /// Method classification for audit.
    method: RpcMethod,
    /// Tool name when the request reached tool dispatch.
    tool: Option<ToolName>,
}

/// Parses the request body and routes it to the method handlers.
fn dispatch(state: &ServerState, identity: &RequestIdentity, bytes: &Bytes) -> RpcReport {
    if bytes.len() > state.max_body_bytes {
        return report_error(
            Value::Null,
            -32700,
            "Parse error".to_string(),
            RpcMethod::Invalid,
            None,
        );
    }
    let Ok(request) = serde_json::from_slice::<JsonRpcRequest>(bytes) else {
        return report_error(
            Value::Null,
            -32700,
            "Parse error".to_string(),
            RpcMethod::Invalid,
            None,
        );
    };
    handle_request(state, identity, request)
}

/// Dispatches a parsed JSON-RPC request.
fn handle_request(
    state: &ServerState,
    identity: &RequestIdentity,
    request: JsonRpcRequest,
) -> RpcReport {
    if request.jsonrpc != "2.0" {
        return report_error(
            request.id,
            -32600,
            "invalid json-rpc version".to_string(),
            RpcMethod::Invalid,
            None,
        );
    }
    match request.method.as_str() {
        "initialize" => match serde_json::to_value(initialize_result()) {
            Ok(value) => report_ok(request.id, value, RpcMethod::Initialize, None),
            Err(_) => serialization_report(request.id, RpcMethod::Initialize, None),
        },
        "tools/list" => match serde_json::to_value(ToolListResult {
            tools: state.router.list_tools(),
        }) {
            Ok(value) => report_ok(request.id, value, RpcMethod::ToolsList, None),
            Err(_) => serialization_report(request.id, RpcMethod::ToolsList, None),
        },
        "tools/call" => {
            let id = request.id;
            let params = request.params.unwrap_or(Value::Null);
            match serde_json::from_value::<ToolCallParams>(params) {
                Ok(call) => {
                    let tool = ToolName::parse(&call.name);
                    let arguments = call.arguments.unwrap_or(Value::Null);
                    match state
                        .router
                        .handle_tool_call(identity, &call.name, arguments)
                        .and_then(|result| wrap_tool_result(&result))
                    {
                        Ok(value) => report_ok(id, value, RpcMethod::ToolsCall, tool),
                        Err(err) => tool_error_report(id, &err, tool),
                    }
                }
                Err(_) => report_error(
                    id,
                    -32602,
                    "Invalid params: name required".to_string(),
                    RpcMethod::ToolsCall,
                    None,
                ),
            }
        }
        _ => report_error(
            request.id,
            -32601,
            format!("method not found: {}", request.method),
            RpcMethod::Unknown,
            None,
        ),
    }
}

/// Builds the `initialize` capability descriptor.
const fn initialize_result() -> InitializeResult {
    InitializeResult {
        protocol_version: PROTOCOL_VERSION,
        capabilities: Capabilities {
            tools: EmptyCapability {},
        },
        server_info: ServerInfo {
            name: SERVICE_NAME,
            version: env!("CARGO_PKG_VERSION"),
        },
    }
}

/// Wraps a tool result as a single text content block.
fn wrap_tool_result(result: &Value) -> Result<Value, ToolError> {
    let text = serde_json::to_string(result).map_err(|_| ToolError::Serialization)?;
    serde_json::to_value(ToolCallResult {
        content: vec![ToolContent::Text {
            text,
        }],
    })
    .map_err(|_| ToolError::Serialization)
}

/// Builds a success report.
fn report_ok(id: Value, result: Value, method: RpcMethod, tool: Option<ToolName>) -> RpcReport {
    RpcReport {
        response: JsonRpcResponse {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        },
        method,
        tool,
    }
}

/// Builds an error report.
fn report_error(
    id: Value,
    code: i64,
    message: String,
    method: RpcMethod,
    tool: Option<ToolName>,
) -> RpcReport {
    RpcReport {
        response: JsonRpcResponse {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
            }),
        },
        method,
        tool,
    }
}

/// Builds the report for a result serialization failure.
fn serialization_report(id: Value, method: RpcMethod, tool: Option<ToolName>) -> RpcReport {
    report_error(
        id,
        -32000,
        "tool execution failed: serialization failure".to_string(),
        method,
        tool,
    )
}

/// Maps a tool failure onto its JSON-RPC error code and message.
fn tool_error_report(id: Value, error: &ToolError, tool: Option<ToolName>) -> RpcReport {
    let (code, message) = match error {
        ToolError::UnknownTool(name) => (-32601, format!("tool not found: {name}")),
        ToolError::Unauthorized(detail) => (-32003, format!("unauthorized: {detail}")),
        ToolError::InvalidParams(detail) => (-32602, format!("Invalid params: {detail}")),
        ToolError::NotFound(detail) | ToolError::Internal(detail) => {
            (-32000, format!("tool execution failed: {detail}"))
        }
        ToolError::Serialization => {
            (-32000, "tool execution failed: serialization failure".to_string())
        }
    };
    report_error(id, code, message, RpcMethod::ToolsCall, tool)
}

/// Emits the per-request audit event.
fn record_rpc_event(
    state: &ServerState,
    identity: &RequestIdentity,
    peer: SocketAddr,
    report: &RpcReport,
    request_bytes: usize,
) {
    let (outcome, error_code) = match &report.response.error {
        Some(error) => (RpcOutcome::Error, Some(error.code)),
        None => (RpcOutcome::Ok, None),
    };
    state.audit.record(&RpcAuditEvent::new(RpcAuditEventParams {
        peer_ip: Some(peer.ip().to_string()),
        method: report.method,
        tool: report.tool,
        outcome,
        error_code,
        subject: identity.subject.clone(),
        scopes: identity.scopes.clone(),
        actor_chain: identity.actor_chain.clone(),
        credential_provenance: identity.credential.provenance,
        request_bytes,
    }));
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// MCP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
