// crates/roster-mcp/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared fixtures for MCP endpoint tests.
// Purpose: Provide routers, identities, and call helpers over a seeded store.
// Dependencies: roster-config, roster-contract, roster-core, roster-mcp
// ============================================================================

//! ## Overview
//! This module provides shared routers over a freshly seeded directory,
//! caller identities with preset scope grants, and a thin call helper used
//! across the MCP test files.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use roster_config::ScopesConfig;
use roster_contract::tool_contracts;
use roster_core::InMemoryDirectoryStore;
use roster_core::SharedDirectoryStore;
use roster_core::parse_scopes;
use roster_mcp::RequestIdentity;
use roster_mcp::ScopeGate;
use roster_mcp::ToolError;
use roster_mcp::ToolRouter;
use serde_json::Value;

// ============================================================================
// SECTION: Test Fixtures
// ============================================================================

/// Creates a router over a seeded store with enforcement off.
#[must_use]
pub fn sample_router() -> ToolRouter {
    router_with_scopes(&ScopesConfig::default())
}

/// Creates a router over a seeded store with local enforcement on.
#[must_use]
pub fn enforcing_router() -> ToolRouter {
    router_with_scopes(&ScopesConfig {
        enforce: true,
        deny_tools: Vec::new(),
    })
}

/// Creates a router over a seeded store with the given scope configuration.
#[must_use]
pub fn router_with_scopes(config: &ScopesConfig) -> ToolRouter {
    ToolRouter::new(
        SharedDirectoryStore::from_store(InMemoryDirectoryStore::seeded()),
        Arc::new(tool_contracts()),
        ScopeGate::from_config(config),
    )
}

/// Creates an anonymous caller identity with the given space-separated scopes.
#[must_use]
pub fn identity_with_scopes(raw: &str) -> RequestIdentity {
    RequestIdentity::anonymous().with_scopes(parse_scopes(raw))
}

/// Invokes a tool as an anonymous caller.
pub fn call(router: &ToolRouter, name: &str, arguments: Value) -> Result<Value, ToolError> {
    router.handle_tool_call(&RequestIdentity::anonymous(), name, arguments)
}
