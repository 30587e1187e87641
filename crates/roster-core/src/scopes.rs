// crates/roster-core/src/scopes.rs
// ============================================================================
// Module: Scope Labels
// Description: Parsing and matching for space-delimited scope labels.
// Purpose: Share scope handling between dispatch, audit, and enforcement.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Scope labels arrive as a single space-delimited header value, e.g.
//! `hr:employee:read hr:salary:read`. Parsing is lenient about extra
//! whitespace; matching is exact string equality.

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses a space-delimited scope header into individual labels.
///
/// Empty input yields an empty list; repeated or surrounding whitespace is
/// ignored.
#[must_use]
pub fn parse_scopes(header: &str) -> Vec<String> {
    header
        .split(' ')
        .map(str::trim)
        .filter(|scope| !scope.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Returns `true` when the granted labels include the required one.
#[must_use]
pub fn has_scope(granted: &[String], required: &str) -> bool {
    granted.iter().any(|scope| scope.as_str() == required)
}

/// Builds the standard denial message for a missing scope label.
#[must_use]
pub fn missing_scope_message(scope: &str) -> String {
    format!("insufficient permissions: missing scope '{scope}'")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
