// crates/roster-contract/src/catalog.rs
// ============================================================================
// Module: Tool Catalog
// Description: Canonical tool contracts and schemas for the Roster endpoint.
// Purpose: Provide the fixed tool surface for listing and dispatch.
// Dependencies: roster-core, serde_json, roster-contract::types
// ============================================================================

//! ## Overview
//! This module defines the canonical tool surface. Contracts drive the MCP
//! tool listing and carry the permission label each tool requires; the label
//! is stripped before anything reaches a client. Listing is ungated, so every
//! caller sees the full catalog regardless of granted scopes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use roster_core::ToolName;
use serde_json::Value;
use serde_json::json;

use crate::types::ToolContract;
use crate::types::ToolDefinition;

// ============================================================================
// SECTION: Tool Contracts
// ============================================================================

/// Returns the canonical tool contracts.
///
/// The order is intentional: it is the order clients see in tool listings
/// and it stays stable across releases. Append new tools at the end.
#[must_use]
pub fn tool_contracts() -> Vec<ToolContract> {
    vec![
        get_employee_contract(),
        update_employee_contract(),
        list_departments_contract(),
        get_salary_contract(),
        update_salary_contract(),
        get_org_chart_contract(),
        list_employees_contract(),
        list_employees_with_salaries_contract(),
        list_employees_by_department_contract(),
    ]
}

/// Returns the MCP tool definitions for tool listing.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    tool_contracts().into_iter().map(ToolContract::into_definition).collect()
}

/// Returns the permission label required to execute a tool.
#[must_use]
pub const fn required_scope(name: ToolName) -> &'static str {
    match name {
        ToolName::GetEmployee | ToolName::ListEmployees | ToolName::ListEmployeesByDepartment => {
            "hr:employee:read"
        }
        ToolName::UpdateEmployee => "hr:employee:write",
        ToolName::ListDepartments => "hr:department:read",
        ToolName::GetSalary | ToolName::ListEmployeesWithSalaries => "hr:salary:read",
        ToolName::UpdateSalary => "hr:salary:write",
        ToolName::GetOrgChart => "hr:org:read",
    }
}

/// Builds the tool contract for `get_employee`.
fn get_employee_contract() -> ToolContract {
    build_tool_contract(
        ToolName::GetEmployee,
        "Get employee information by employee ID",
        tool_input_schema(
            &json!({
                "employee_id": schema_string("The employee ID (e.g., emp-001)")
            }),
            &["employee_id"],
        ),
    )
}

/// Builds the tool contract for `update_employee`.
fn update_employee_contract() -> ToolContract {
    build_tool_contract(
        ToolName::UpdateEmployee,
        "Update employee information",
        tool_input_schema(
            &json!({
                "employee_id": schema_string("The employee ID (e.g., emp-001)"),
                "title": schema_string("New job title"),
                "location": schema_string("New location")
            }),
            &["employee_id"],
        ),
    )
}

/// Builds the tool contract for `list_departments`.
fn list_departments_contract() -> ToolContract {
    build_tool_contract(
        ToolName::ListDepartments,
        "List all departments in the organization",
        empty_input_schema(),
    )
}

/// Builds the tool contract for `get_salary`.
fn get_salary_contract() -> ToolContract {
    build_tool_contract(
        ToolName::GetSalary,
        "Get salary information for an employee (sensitive data)",
        tool_input_schema(
            &json!({
                "employee_id": schema_string("The employee ID (e.g., emp-001)")
            }),
            &["employee_id"],
        ),
    )
}

/// Builds the tool contract for `update_salary`.
fn update_salary_contract() -> ToolContract {
    build_tool_contract(
        ToolName::UpdateSalary,
        "Update salary information (highly sensitive operation)",
        tool_input_schema(
            &json!({
                "employee_id": schema_string("The employee ID (e.g., emp-001)"),
                "base": schema_amount("New base salary"),
                "bonus": schema_amount("New bonus amount"),
                "equity": schema_amount("New equity amount")
            }),
            &["employee_id"],
        ),
    )
}

/// Builds the tool contract for `get_org_chart`.
fn get_org_chart_contract() -> ToolContract {
    build_tool_contract(
        ToolName::GetOrgChart,
        "Get organizational chart and structure",
        empty_input_schema(),
    )
}

/// Builds the tool contract for `list_employees`.
fn list_employees_contract() -> ToolContract {
    build_tool_contract(
        ToolName::ListEmployees,
        "List all employees in the organization",
        empty_input_schema(),
    )
}

/// Builds the tool contract for `list_employees_with_salaries`.
fn list_employees_with_salaries_contract() -> ToolContract {
    build_tool_contract(
        ToolName::ListEmployeesWithSalaries,
        "List all employees with their salary information. Use this instead of calling \
         get_salary for each employee individually.",
        empty_input_schema(),
    )
}

/// Builds the tool contract for `list_employees_by_department`.
fn list_employees_by_department_contract() -> ToolContract {
    build_tool_contract(
        ToolName::ListEmployeesByDepartment,
        "List all employees grouped by their department. Use this to see which employees belong \
         to each department.",
        empty_input_schema(),
    )
}

// ============================================================================
// SECTION: Schema Helpers
// ============================================================================

/// Builds a tool contract with the catalog's permission label attached.
#[must_use]
fn build_tool_contract(name: ToolName, description: &str, input_schema: Value) -> ToolContract {
    ToolContract {
        name,
        description: description.to_string(),
        input_schema,
        required_scope: required_scope(name).to_string(),
    }
}

/// Builds a standard tool input schema wrapper.
///
/// The `required` list is omitted entirely when empty to keep the wire shape
/// minimal for parameterless tools.
#[must_use]
fn tool_input_schema(properties: &Value, required: &[&str]) -> Value {
    if required.is_empty() {
        return json!({
            "type": "object",
            "properties": properties
        });
    }
    let required_values: Vec<Value> =
        required.iter().map(|value| Value::String((*value).to_string())).collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required_values
    })
}

/// Builds the input schema for tools that take no arguments.
#[must_use]
fn empty_input_schema() -> Value {
    tool_input_schema(&json!({}), &[])
}

/// Returns a schema describing a free-text string field.
#[must_use]
fn schema_string(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description
    })
}

/// Returns a schema describing a compensation amount field.
#[must_use]
fn schema_amount(description: &str) -> Value {
    json!({
        "type": "number",
        "description": description
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
