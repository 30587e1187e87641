// crates/roster-mcp/src/audit.rs
// ============================================================================
// Module: Audit Logging
// Description: Structured audit events for RPC handling and credential decoding.
// Purpose: Emit JSON-line audit records without binding to a logging pipeline.
// Dependencies: roster-core, serde
// ============================================================================

//! ## Overview
//! Every RPC request produces one [`RpcAuditEvent`] correlating the caller's
//! subject, scope labels, tool name, and outcome; credential extraction
//! produces a [`CredentialAuditEvent`] describing the envelope decode attempt.
//! Events are JSON lines routed through an [`AuditSink`] so deployments can
//! point them at stderr, a file, or their own pipeline. Credential values
//! never appear in events; only provenance and diagnostics do.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use roster_core::ToolName;
use serde::Serialize;

use crate::auth::CredentialOutcome;
use crate::auth::CredentialProvenance;

// ============================================================================
// SECTION: Labels
// ============================================================================

/// JSON-RPC method classification for audit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RpcMethod {
    /// Capability negotiation.
    #[serde(rename = "initialize")]
    Initialize,
    /// Tool enumeration.
    #[serde(rename = "tools/list")]
    ToolsList,
    /// Tool invocation.
    #[serde(rename = "tools/call")]
    ToolsCall,
    /// Recognized envelope with an unrecognized method name.
    #[serde(rename = "unknown")]
    Unknown,
    /// Request that never yielded a method (bad verb or unparseable body).
    #[serde(rename = "invalid")]
    Invalid,
}

/// Request outcome label for audit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RpcOutcome {
    /// Request produced a JSON-RPC result.
    Ok,
    /// Request produced a JSON-RPC error.
    Error,
}

// ============================================================================
// SECTION: Events
// ============================================================================

/// RPC request audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct RpcAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// JSON-RPC method classification.
    pub method: RpcMethod,
    /// Tool name when the request reached tool dispatch.
    pub tool: Option<ToolName>,
    /// Request outcome.
    pub outcome: RpcOutcome,
    /// JSON-RPC error code when present.
    pub error_code: Option<i64>,
    /// Caller subject when provided.
    pub subject: Option<String>,
    /// Scope labels asserted for the caller.
    pub scopes: Vec<String>,
    /// Opaque delegation chain when provided.
    pub actor_chain: Option<String>,
    /// Provenance of the effective credential.
    pub credential_provenance: CredentialProvenance,
    /// Request body size in bytes.
    pub request_bytes: usize,
}

/// Inputs required to construct an RPC audit event.
pub struct RpcAuditEventParams {
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// JSON-RPC method classification.
    pub method: RpcMethod,
    /// Tool name when the request reached tool dispatch.
    pub tool: Option<ToolName>,
    /// Request outcome.
    pub outcome: RpcOutcome,
    /// JSON-RPC error code when present.
    pub error_code: Option<i64>,
    /// Caller subject when provided.
    pub subject: Option<String>,
    /// Scope labels asserted for the caller.
    pub scopes: Vec<String>,
    /// Opaque delegation chain when provided.
    pub actor_chain: Option<String>,
    /// Provenance of the effective credential.
    pub credential_provenance: CredentialProvenance,
    /// Request body size in bytes.
    pub request_bytes: usize,
}

impl RpcAuditEvent {
    /// Creates a new RPC audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: RpcAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "rpc",
            timestamp_ms,
            peer_ip: params.peer_ip,
            method: params.method,
            tool: params.tool,
            outcome: params.outcome,
            error_code: params.error_code,
            subject: params.subject,
            scopes: params.scopes,
            actor_chain: params.actor_chain,
            credential_provenance: params.credential_provenance,
            request_bytes: params.request_bytes,
        }
    }
}

/// Credential extraction audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// Provenance of the effective credential.
    pub provenance: CredentialProvenance,
    /// Extraction outcome label.
    pub outcome: CredentialOutcome,
    /// Decode diagnostics; never contains the credential value.
    pub detail: Option<String>,
}

/// Inputs required to construct a credential audit event.
pub struct CredentialAuditEventParams {
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// Provenance of the effective credential.
    pub provenance: CredentialProvenance,
    /// Extraction outcome label.
    pub outcome: CredentialOutcome,
    /// Decode diagnostics; never contains the credential value.
    pub detail: Option<String>,
}

impl CredentialAuditEvent {
    /// Creates a new credential audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: CredentialAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "credential",
            timestamp_ms,
            peer_ip: params.peer_ip,
            provenance: params.provenance,
            outcome: params.outcome,
            detail: params.detail,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for RPC request events.
pub trait AuditSink: Send + Sync {
    /// Record an RPC audit event.
    fn record(&self, event: &RpcAuditEvent);

    /// Record a credential extraction audit event.
    fn record_credential(&self, _event: &CredentialAuditEvent) {}
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &RpcAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }

    fn record_credential(&self, event: &CredentialAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: &RpcAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }

    fn record_credential(&self, event: &CredentialAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &RpcAuditEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================
