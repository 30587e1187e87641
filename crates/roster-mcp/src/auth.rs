// crates/roster-mcp/src/auth.rs
// ============================================================================
// Module: Credential Extraction
// Description: Token-exchange envelope decoding and scope gating for requests.
// Purpose: Derive the effective credential and caller identity from trust headers.
// Dependencies: roster-config, roster-core, base64, serde
// ============================================================================

//! ## Overview
//! Upstream infrastructure forwards a pre-exchanged access token inside a
//! base64-encoded token-exchange envelope header, alongside plain trust
//! headers for the caller's subject, scopes, and delegation chain. This module
//! decodes the envelope into an effective credential, falls back to the plain
//! `Authorization` header when the envelope is absent or malformed, and hosts
//! the optional scope gate applied before tool execution. Decode failures
//! never reject a request; they only downgrade the credential's provenance.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use roster_config::ScopesConfig;
use roster_core::ToolName;
use roster_core::has_scope;
use roster_core::missing_scope_message;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Header carrying the base64-encoded token-exchange envelope.
pub const ENVELOPE_HEADER: &str = "x-introspection-token";
/// Header carrying the caller's space-delimited scope labels.
pub const SCOPES_HEADER: &str = "x-user-scopes";
/// Header carrying the caller's subject identifier.
pub const SUBJECT_HEADER: &str = "x-user-sub";
/// Header carrying the opaque delegation chain.
pub const ACTOR_CHAIN_HEADER: &str = "x-actor-chain";

/// Upper bound on the envelope header size before decoding.
const MAX_ENVELOPE_HEADER_BYTES: usize = 8 * 1024;

// ============================================================================
// SECTION: Token Envelope
// ============================================================================

/// Token-exchange response envelope forwarded by the upstream perimeter.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenExchangeEnvelope {
    /// Exchanged access token.
    pub access_token: String,
    /// Issued token type URN.
    pub issued_token_type: Option<String>,
    /// Token type label (typically `Bearer`).
    pub token_type: Option<String>,
    /// Token lifetime in seconds.
    pub expires_in: Option<u64>,
    /// Space-delimited scopes granted to the token.
    pub scope: Option<String>,
}

impl TokenExchangeEnvelope {
    /// Formats the envelope scope and expiry for trace logging.
    ///
    /// The token value itself is never included.
    #[must_use]
    pub fn trace_detail(&self) -> String {
        let scope = self.scope.as_deref().unwrap_or("-");
        let expires_in =
            self.expires_in.map_or_else(|| "-".to_string(), |seconds| seconds.to_string());
        format!("scope={scope} expires_in={expires_in}")
    }
}

/// Token envelope decode errors.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Envelope header exceeds the size bound.
    #[error("token envelope header exceeds size limit")]
    TooLarge,
    /// Envelope header is not valid base64.
    #[error("invalid base64 in token envelope")]
    Base64,
    /// Decoded bytes are not a valid envelope object.
    #[error("invalid token envelope json: {0}")]
    Json(String),
    /// Envelope decoded but carries an empty access token.
    #[error("token envelope access token is empty")]
    EmptyAccessToken,
}

/// Decodes a base64-encoded token-exchange envelope header value.
///
/// # Errors
///
/// Returns [`EnvelopeError`] when the header is oversized, not valid base64,
/// not a valid JSON envelope, or carries an empty access token.
pub fn decode_envelope(raw: &str) -> Result<TokenExchangeEnvelope, EnvelopeError> {
    if raw.len() > MAX_ENVELOPE_HEADER_BYTES {
        return Err(EnvelopeError::TooLarge);
    }
    let bytes = STANDARD.decode(raw.trim()).map_err(|_| EnvelopeError::Base64)?;
    let envelope: TokenExchangeEnvelope =
        serde_json::from_slice(&bytes).map_err(|err| EnvelopeError::Json(err.to_string()))?;
    if envelope.access_token.is_empty() {
        return Err(EnvelopeError::EmptyAccessToken);
    }
    Ok(envelope)
}

// ============================================================================
// SECTION: Credentials
// ============================================================================

/// Source of the effective credential for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialProvenance {
    /// Decoded from the token-exchange envelope header.
    Exchanged,
    /// Taken verbatim from the `Authorization` header.
    Direct,
    /// No credential source present.
    Absent,
}

impl CredentialProvenance {
    /// Returns the provenance label used in audit events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exchanged => "exchanged",
            Self::Direct => "direct",
            Self::Absent => "absent",
        }
    }
}

/// Outcome of a credential extraction attempt, recorded for audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialOutcome {
    /// Envelope header decoded into a usable credential.
    Decoded,
    /// Envelope header present but undecodable; fallback applied.
    Malformed,
    /// No envelope; plain `Authorization` header used.
    Header,
    /// No credential source present.
    Absent,
}

/// Effective credential propagated downstream and echoed to the caller.
#[derive(Debug, Clone)]
pub struct Credential {
    /// Credential string, empty when absent.
    pub value: String,
    /// Where the credential came from.
    pub provenance: CredentialProvenance,
}

impl Credential {
    /// Builds the empty credential used when no source header is present.
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            value: String::new(),
            provenance: CredentialProvenance::Absent,
        }
    }

    /// Returns true when no credential value was derived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Credential extraction result with decode diagnostics for audit.
#[derive(Debug, Clone)]
pub struct CredentialExtraction {
    /// Effective credential for the request.
    pub credential: Credential,
    /// Extraction outcome label.
    pub outcome: CredentialOutcome,
    /// Decode diagnostics; never contains the credential value.
    pub detail: Option<String>,
}

/// Derives the effective credential from the envelope and fallback headers.
///
/// Precedence: a decodable envelope wins; a malformed envelope is recorded
/// and the plain `Authorization` value is used instead; with neither source
/// the credential is empty. Extraction never fails the request.
#[must_use]
pub fn extract_credential(
    envelope_header: Option<&str>,
    authorization: Option<&str>,
) -> CredentialExtraction {
    if let Some(raw) = envelope_header {
        match decode_envelope(raw) {
            Ok(envelope) => {
                return CredentialExtraction {
                    credential: Credential {
                        value: format!("Bearer {}", envelope.access_token),
                        provenance: CredentialProvenance::Exchanged,
                    },
                    outcome: CredentialOutcome::Decoded,
                    detail: Some(envelope.trace_detail()),
                };
            }
            Err(err) => {
                return CredentialExtraction {
                    credential: fallback_credential(authorization),
                    outcome: CredentialOutcome::Malformed,
                    detail: Some(err.to_string()),
                };
            }
        }
    }
    let credential = fallback_credential(authorization);
    let outcome = match credential.provenance {
        CredentialProvenance::Direct => CredentialOutcome::Header,
        CredentialProvenance::Exchanged | CredentialProvenance::Absent => {
            CredentialOutcome::Absent
        }
    };
    CredentialExtraction {
        credential,
        outcome,
        detail: None,
    }
}

/// Builds the fallback credential from the plain `Authorization` header.
fn fallback_credential(authorization: Option<&str>) -> Credential {
    match authorization {
        Some(value) if !value.is_empty() => Credential {
            value: value.to_string(),
            provenance: CredentialProvenance::Direct,
        },
        _ => Credential::absent(),
    }
}

// ============================================================================
// SECTION: Request Identity
// ============================================================================

/// Caller identity assembled from trust headers.
#[derive(Debug, Clone)]
pub struct RequestIdentity {
    /// Caller subject identifier.
    pub subject: Option<String>,
    /// Parsed scope labels granted to the caller.
    pub scopes: Vec<String>,
    /// Opaque delegation chain, recorded only.
    pub actor_chain: Option<String>,
    /// Effective credential for the request.
    pub credential: Credential,
}

impl RequestIdentity {
    /// Builds an identity with no headers present.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            subject: None,
            scopes: Vec::new(),
            actor_chain: None,
            credential: Credential::absent(),
        }
    }

    /// Returns a copy with the scope labels replaced.
    #[must_use]
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }
}

// ============================================================================
// SECTION: Scope Gate
// ============================================================================

/// Scope gate errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Caller lacks a required scope or matches a deny rule.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

/// Optional local enforcement of per-tool scope labels.
///
/// Enforcement defaults to off: the perimeter that issued the credential is
/// expected to gate access, and this core only records the labels it saw.
/// Deny rules bind even when enforcement is off.
#[derive(Debug, Clone)]
pub struct ScopeGate {
    /// Whether scope labels are compared against tool requirements.
    enforce: bool,
    /// Tools denied regardless of granted labels.
    deny_tools: BTreeSet<ToolName>,
}

impl ScopeGate {
    /// Builds a scope gate from the scopes configuration.
    #[must_use]
    pub fn from_config(config: &ScopesConfig) -> Self {
        // Config validation rejects unknown deny_tools names before this point.
        let deny_tools =
            config.deny_tools.iter().filter_map(|name| ToolName::parse(name)).collect();
        Self {
            enforce: config.enforce,
            deny_tools,
        }
    }

    /// Checks a tool call against the deny list and required scope.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthorized`] when the tool is denied by policy
    /// or, with enforcement on, when the required scope is not granted.
    pub fn check(
        &self,
        scopes: &[String],
        tool: ToolName,
        required_scope: &str,
    ) -> Result<(), AuthError> {
        if self.deny_tools.contains(&tool) {
            return Err(AuthError::Unauthorized(format!("tool '{tool}' is denied by policy")));
        }
        if !self.enforce {
            return Ok(());
        }
        if has_scope(scopes, required_scope) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized(missing_scope_message(required_scope)))
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::use_debug,
        clippy::dbg_macro,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        reason = "Test-only output and panic-based assertions are permitted."
    )]

    use super::*;

    fn encode_envelope(payload: &str) -> String {
        STANDARD.encode(payload.as_bytes())
    }

    /// Verifies the exchanged-token precedence path.
    #[test]
    fn envelope_yields_exchanged_bearer_credential() {
        let header = encode_envelope(r#"{"access_token":"T1","scope":"r:a r:b","expires_in":3600}"#);
        let extraction = extract_credential(Some(&header), Some("Bearer fallback"));
        assert_eq!(extraction.credential.value, "Bearer T1");
        assert_eq!(extraction.credential.provenance, CredentialProvenance::Exchanged);
        assert_eq!(extraction.outcome, CredentialOutcome::Decoded);
        let detail = extraction.detail.unwrap();
        assert_eq!(detail, "scope=r:a r:b expires_in=3600");
    }

    /// Verifies a non-base64 envelope falls back to the plain header.
    #[test]
    fn invalid_base64_falls_back_to_authorization() {
        let extraction = extract_credential(Some("%%% not base64 %%%"), Some("Bearer direct"));
        assert_eq!(extraction.credential.value, "Bearer direct");
        assert_eq!(extraction.credential.provenance, CredentialProvenance::Direct);
        assert_eq!(extraction.outcome, CredentialOutcome::Malformed);
        assert!(extraction.detail.unwrap().contains("base64"));
    }

    /// Verifies decodable base64 with non-envelope content still falls back.
    #[test]
    fn invalid_envelope_json_falls_back() {
        let header = encode_envelope("not json at all");
        let extraction = extract_credential(Some(&header), None);
        assert!(extraction.credential.is_empty());
        assert_eq!(extraction.credential.provenance, CredentialProvenance::Absent);
        assert_eq!(extraction.outcome, CredentialOutcome::Malformed);
    }

    /// Verifies an empty access token is treated as malformed.
    #[test]
    fn empty_access_token_is_malformed() {
        let header = encode_envelope(r#"{"access_token":""}"#);
        let extraction = extract_credential(Some(&header), Some("Bearer direct"));
        assert_eq!(extraction.credential.value, "Bearer direct");
        assert_eq!(extraction.outcome, CredentialOutcome::Malformed);
    }

    /// Verifies an oversized envelope header is rejected before decoding.
    #[test]
    fn oversized_envelope_header_is_malformed() {
        let header = "A".repeat(MAX_ENVELOPE_HEADER_BYTES + 1);
        let extraction = extract_credential(Some(&header), None);
        assert_eq!(extraction.outcome, CredentialOutcome::Malformed);
        assert!(extraction.detail.unwrap().contains("size limit"));
    }

    /// Verifies the plain-header path without an envelope.
    #[test]
    fn authorization_header_is_used_verbatim() {
        let extraction = extract_credential(None, Some("Bearer plain-token"));
        assert_eq!(extraction.credential.value, "Bearer plain-token");
        assert_eq!(extraction.credential.provenance, CredentialProvenance::Direct);
        assert_eq!(extraction.outcome, CredentialOutcome::Header);
        assert!(extraction.detail.is_none());
    }

    /// Verifies the absent path yields an empty credential.
    #[test]
    fn missing_headers_yield_absent_credential() {
        let extraction = extract_credential(None, None);
        assert!(extraction.credential.is_empty());
        assert_eq!(extraction.credential.provenance, CredentialProvenance::Absent);
        assert_eq!(extraction.outcome, CredentialOutcome::Absent);
    }

    /// Verifies an empty authorization value counts as absent.
    #[test]
    fn empty_authorization_value_is_absent() {
        let extraction = extract_credential(None, Some(""));
        assert_eq!(extraction.credential.provenance, CredentialProvenance::Absent);
        assert_eq!(extraction.outcome, CredentialOutcome::Absent);
    }

    fn gate(enforce: bool, deny: &[&str]) -> ScopeGate {
        ScopeGate::from_config(&ScopesConfig {
            enforce,
            deny_tools: deny.iter().map(ToString::to_string).collect(),
        })
    }

    /// Verifies the gate allows everything when enforcement is off.
    #[test]
    fn gate_allows_all_when_enforcement_off() {
        let gate = gate(false, &[]);
        let result = gate.check(&[], ToolName::GetSalary, "hr:salary:read");
        assert!(result.is_ok());
    }

    /// Verifies enforcement requires the exact scope label.
    #[test]
    fn gate_requires_scope_when_enforcing() {
        let gate = gate(true, &[]);
        let scopes = vec!["hr:employee:read".to_string()];
        let denied = gate.check(&scopes, ToolName::GetSalary, "hr:salary:read");
        let message = denied.unwrap_err().to_string();
        assert_eq!(
            message,
            "unauthorized: insufficient permissions: missing scope 'hr:salary:read'"
        );
        let allowed = gate.check(&scopes, ToolName::GetEmployee, "hr:employee:read");
        assert!(allowed.is_ok());
    }

    /// Verifies deny rules override granted scopes and bind with enforcement off.
    #[test]
    fn gate_deny_rules_override_grants() {
        let gate = gate(false, &["update_salary"]);
        let scopes = vec!["hr:salary:write".to_string()];
        let denied = gate.check(&scopes, ToolName::UpdateSalary, "hr:salary:write");
        assert!(denied.unwrap_err().to_string().contains("denied by policy"));
        let allowed = gate.check(&scopes, ToolName::GetSalary, "hr:salary:read");
        assert!(allowed.is_ok());
    }
}
