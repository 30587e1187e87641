// crates/roster-config/src/lib.rs
// ============================================================================
// Module: Roster Config Library
// Description: Public API surface for Roster configuration loading.
// Purpose: Expose the configuration types and loader.
// Dependencies: crate::config
// ============================================================================

//! ## Overview
//! Roster configuration is loaded from a TOML file with strict size and path
//! limits and fail-closed validation. A missing file at the default location
//! is not an error; built-in defaults serve a working endpoint.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::AuditConfig;
pub use config::ConfigError;
pub use config::RosterConfig;
pub use config::ScopesConfig;
pub use config::ServerConfig;
