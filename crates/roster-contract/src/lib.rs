// crates/roster-contract/src/lib.rs
// ============================================================================
// Module: Roster Contract Library
// Description: Public API surface for the Roster tool contract crate.
// Purpose: Expose the tool catalog and wire-facing definition types.
// Dependencies: crate::{catalog, types}
// ============================================================================

//! ## Overview
//! Roster contract defines the canonical tool surface: contracts carrying the
//! full catalog metadata (schemas plus permission labels) and the stripped
//! definitions clients see in tool listings. The catalog order is part of the
//! external contract.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::required_scope;
pub use catalog::tool_contracts;
pub use catalog::tool_definitions;
pub use types::ToolContract;
pub use types::ToolDefinition;
