// crates/roster-mcp/src/lib.rs
// ============================================================================
// Module: Roster MCP Library
// Description: MCP endpoint exposing workforce directory tools over JSON-RPC.
// Purpose: Wire credential handling, auditing, and tool dispatch together.
// Dependencies: roster-config, roster-contract, roster-core, axum, tokio
// ============================================================================

//! ## Overview
//! This crate serves the Roster tool catalog over HTTP. A single JSON-RPC
//! endpoint handles `initialize`, `tools/list`, and `tools/call`;
//! [`tools::ToolRouter`] dispatches invocations against the shared directory
//! store. [`auth`] decodes forwarded token-exchange envelopes and assembles
//! the caller identity from gateway trust headers, [`audit`] records one
//! structured event per request, and [`server`] owns the transport concerns:
//! CORS, body limits, credential echo, and liveness.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod auth;
pub mod server;
pub mod tools;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::CredentialAuditEvent;
pub use audit::CredentialAuditEventParams;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::RpcAuditEvent;
pub use audit::RpcAuditEventParams;
pub use audit::RpcMethod;
pub use audit::RpcOutcome;
pub use audit::StderrAuditSink;
pub use auth::AuthError;
pub use auth::Credential;
pub use auth::CredentialExtraction;
pub use auth::CredentialOutcome;
pub use auth::CredentialProvenance;
pub use auth::EnvelopeError;
pub use auth::RequestIdentity;
pub use auth::ScopeGate;
pub use auth::TokenExchangeEnvelope;
pub use auth::decode_envelope;
pub use auth::extract_credential;
pub use server::McpServer;
pub use server::ServerError;
pub use tools::ToolError;
pub use tools::ToolRouter;
