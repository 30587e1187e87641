// crates/roster-core/src/tooling.rs
// ============================================================================
// Module: Tooling Identifiers
// Description: Canonical MCP tool identifiers for Roster.
// Purpose: Shared tool naming across contracts, runtime, and config.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Canonical tool identifiers used by the Roster MCP endpoint.
//! These names are part of the external contract surface.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Canonical tool names for the Roster MCP endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    /// Fetch a single employee record.
    GetEmployee,
    /// Apply a partial update to an employee record.
    UpdateEmployee,
    /// List all departments.
    ListDepartments,
    /// Fetch the salary record for an employee.
    GetSalary,
    /// Apply a partial update to a salary record.
    UpdateSalary,
    /// Fetch the organizational chart.
    GetOrgChart,
    /// List all employees with identifier and name.
    ListEmployees,
    /// List employees joined with their salary records.
    ListEmployeesWithSalaries,
    /// List employees grouped by department name.
    ListEmployeesByDepartment,
}

impl ToolName {
    /// Returns the canonical string name for the tool.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetEmployee => "get_employee",
            Self::UpdateEmployee => "update_employee",
            Self::ListDepartments => "list_departments",
            Self::GetSalary => "get_salary",
            Self::UpdateSalary => "update_salary",
            Self::GetOrgChart => "get_org_chart",
            Self::ListEmployees => "list_employees",
            Self::ListEmployeesWithSalaries => "list_employees_with_salaries",
            Self::ListEmployeesByDepartment => "list_employees_by_department",
        }
    }

    /// Returns all Roster tool names in canonical catalog order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::GetEmployee,
            Self::UpdateEmployee,
            Self::ListDepartments,
            Self::GetSalary,
            Self::UpdateSalary,
            Self::GetOrgChart,
            Self::ListEmployees,
            Self::ListEmployeesWithSalaries,
            Self::ListEmployeesByDepartment,
        ]
    }

    /// Parses a tool name from its string representation.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "get_employee" => Some(Self::GetEmployee),
            "update_employee" => Some(Self::UpdateEmployee),
            "list_departments" => Some(Self::ListDepartments),
            "get_salary" => Some(Self::GetSalary),
            "update_salary" => Some(Self::UpdateSalary),
            "get_org_chart" => Some(Self::GetOrgChart),
            "list_employees" => Some(Self::ListEmployees),
            "list_employees_with_salaries" => Some(Self::ListEmployeesWithSalaries),
            "list_employees_by_department" => Some(Self::ListEmployeesByDepartment),
            _ => None,
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
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

    /// Verifies every canonical name round-trips through parse.
    #[test]
    fn parse_round_trips_all_names() {
        for tool in ToolName::all() {
            assert_eq!(ToolName::parse(tool.as_str()), Some(*tool));
        }
    }

    /// Verifies unknown names do not parse.
    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!(ToolName::parse("nonexistent_tool"), None);
        assert_eq!(ToolName::parse("GET_EMPLOYEE"), None);
        assert_eq!(ToolName::parse(""), None);
    }

    /// Verifies serde uses the canonical snake_case names.
    #[test]
    fn serde_uses_canonical_names() {
        let value = serde_json::to_value(ToolName::ListEmployeesWithSalaries).unwrap();
        assert_eq!(value, serde_json::json!("list_employees_with_salaries"));
        let parsed: ToolName = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, ToolName::ListEmployeesWithSalaries);
    }

    /// Verifies catalog order is stable.
    #[test]
    fn all_lists_nine_tools_in_catalog_order() {
        let names: Vec<&str> = ToolName::all().iter().map(|tool| tool.as_str()).collect();
        assert_eq!(names, vec![
            "get_employee",
            "update_employee",
            "list_departments",
            "get_salary",
            "update_salary",
            "get_org_chart",
            "list_employees",
            "list_employees_with_salaries",
            "list_employees_by_department",
        ]);
    }
}
