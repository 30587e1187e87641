// crates/roster-core/src/lib.rs
// ============================================================================
// Module: Roster Core Library
// Description: Public API surface for the Roster directory core.
// Purpose: Expose directory records, the store contract, and shared naming.
// Dependencies: crate::{records, scopes, seed, store, tooling}
// ============================================================================

//! ## Overview
//! Roster core provides the employee directory domain: record types, a
//! concurrency-safe store contract with an in-memory implementation, scope
//! label helpers, and the canonical tool identifiers shared by the contract
//! and serving crates.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod records;
pub mod scopes;
mod seed;
pub mod store;
pub mod tooling;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use records::Department;
pub use records::Employee;
pub use records::EmployeeUpdate;
pub use records::Salary;
pub use records::SalaryUpdate;
pub use scopes::has_scope;
pub use scopes::missing_scope_message;
pub use scopes::parse_scopes;
pub use store::DirectoryStore;
pub use store::InMemoryDirectoryStore;
pub use store::SharedDirectoryStore;
pub use store::StoreError;
pub use tooling::ToolName;
