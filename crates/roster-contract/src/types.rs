// crates/roster-contract/src/types.rs
// ============================================================================
// Module: Contract Types
// Description: Tool contract and definition shapes for the Roster catalog.
// Purpose: Separate internal catalog metadata from the client-visible shape.
// Dependencies: roster-core, serde, serde_json
// ============================================================================

//! ## Overview
//! [`ToolContract`] is the internal catalog entry and carries the permission
//! label gating execution. [`ToolDefinition`] is the only shape emitted to
//! clients; it never includes the label.

// ============================================================================
// SECTION: Imports
// ============================================================================

use roster_core::ToolName;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Tool definition shape used by MCP tool listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// MCP tool name.
    pub name: ToolName,
    /// Tool description for clients.
    pub description: String,
    /// JSON schema for tool input.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Full catalog entry for a tool.
///
/// # Invariants
/// - `input_schema` is a JSON Schema payload.
/// - `required_scope` never appears in client-facing listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolContract {
    /// Tool name.
    pub name: ToolName,
    /// Tool description.
    pub description: String,
    /// JSON schema for tool input payload.
    pub input_schema: Value,
    /// Permission label required to execute the tool.
    pub required_scope: String,
}

impl ToolContract {
    /// Strips the contract down to its client-visible definition.
    #[must_use]
    pub fn into_definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name,
            description: self.description,
            input_schema: self.input_schema,
        }
    }
}
