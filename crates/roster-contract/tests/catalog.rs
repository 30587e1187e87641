// crates/roster-contract/tests/catalog.rs
// ============================================================================
// Module: Tool Catalog Tests
// Description: Validate catalog schemas and the client-visible wire shape.
// Purpose: Ensure every advertised schema compiles and accepts valid calls.
// Dependencies: roster-contract, roster-core, jsonschema
// ============================================================================

//! ## Overview
//! Compiles every catalog input schema and checks representative payloads
//! against the argument-taking tools.

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

use jsonschema::Draft;
use jsonschema::Validator;
use roster_contract::tool_contracts;
use roster_contract::tool_definitions;
use roster_core::ToolName;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Schema Helpers
// ============================================================================

fn compile_schema(schema: &Value) -> Result<Validator, String> {
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .map_err(|err| format!("catalog schema compilation failed: {err}"))
}

fn validator_for(name: ToolName) -> Validator {
    let contract = tool_contracts()
        .into_iter()
        .find(|contract| contract.name == name)
        .unwrap_or_else(|| panic!("missing contract for {name}"));
    compile_schema(&contract.input_schema).unwrap()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Verifies every catalog input schema compiles as JSON Schema.
#[test]
fn every_input_schema_compiles() {
    for contract in tool_contracts() {
        if let Err(message) = compile_schema(&contract.input_schema) {
            panic!("{}: {message}", contract.name);
        }
    }
}

/// Verifies the `get_employee` schema accepts and rejects as advertised.
#[test]
fn get_employee_schema_enforces_required_id() {
    let validator = validator_for(ToolName::GetEmployee);
    assert!(validator.is_valid(&json!({"employee_id": "emp-001"})));
    assert!(!validator.is_valid(&json!({})));
    assert!(!validator.is_valid(&json!({"employee_id": 7})));
}

/// Verifies optional update fields stay optional in the schema.
#[test]
fn update_employee_schema_keeps_fields_optional() {
    let validator = validator_for(ToolName::UpdateEmployee);
    assert!(validator.is_valid(&json!({"employee_id": "emp-001"})));
    assert!(validator.is_valid(&json!({
        "employee_id": "emp-001",
        "title": "Principal Engineer",
        "location": "Denver"
    })));
    assert!(!validator.is_valid(&json!({"title": "Principal Engineer"})));
}

/// Verifies parameterless tools accept an empty argument object.
#[test]
fn parameterless_schemas_accept_empty_objects() {
    for name in [
        ToolName::ListDepartments,
        ToolName::GetOrgChart,
        ToolName::ListEmployees,
        ToolName::ListEmployeesWithSalaries,
        ToolName::ListEmployeesByDepartment,
    ] {
        let validator = validator_for(name);
        assert!(validator.is_valid(&json!({})), "{name} rejected empty arguments");
    }
}

/// Verifies the listing wire shape: name, description, and `inputSchema` only.
#[test]
fn listing_wire_shape_is_minimal() {
    for definition in tool_definitions() {
        let value = serde_json::to_value(&definition).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["description", "inputSchema", "name"]);
    }
}
