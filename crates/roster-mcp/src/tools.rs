// crates/roster-mcp/src/tools.rs
// ============================================================================
// Module: Tool Router
// Description: Tool routing for the Roster MCP server.
// Purpose: Execute catalog tools against the directory store.
// Dependencies: roster-contract, roster-core, serde
// ============================================================================

//! ## Overview
//! The tool router resolves a tool name through the injected catalog, applies
//! the scope gate, decodes the arguments into the tool's typed parameter
//! struct, and executes the bound operation against the directory store. The
//! store handle, catalog contracts, and gate are all injected at construction.
//!
//! Error classes stay distinct end to end: unknown tools, argument shape
//! failures, scope denials, and store misses each map to their own
//! [`ToolError`] variant so the dispatch layer can assign distinct codes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use roster_contract::ToolContract;
use roster_contract::ToolDefinition;
use roster_core::Department;
use roster_core::DirectoryStore;
use roster_core::Employee;
use roster_core::EmployeeUpdate;
use roster_core::Salary;
use roster_core::SalaryUpdate;
use roster_core::SharedDirectoryStore;
use roster_core::StoreError;
use roster_core::ToolName;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::auth::AuthError;
use crate::auth::RequestIdentity;
use crate::auth::ScopeGate;

// ============================================================================
// SECTION: Tool Router
// ============================================================================

/// Tool router for MCP requests.
#[derive(Clone)]
pub struct ToolRouter {
    /// Directory store backing all tool operations.
    store: SharedDirectoryStore,
    /// Catalog contracts in registration order.
    contracts: Arc<Vec<ToolContract>>,
    /// Scope gate applied before execution.
    gate: ScopeGate,
}

impl ToolRouter {
    /// Builds a tool router from its injected collaborators.
    #[must_use]
    pub const fn new(
        store: SharedDirectoryStore,
        contracts: Arc<Vec<ToolContract>>,
        gate: ScopeGate,
    ) -> Self {
        Self {
            store,
            contracts,
            gate,
        }
    }

    /// Lists the client-visible definitions for the full catalog.
    ///
    /// Listing is never gated; only execution is.
    #[must_use]
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.contracts.iter().map(|contract| contract.clone().into_definition()).collect()
    }

    /// Handles a tool call by name with a JSON arguments payload.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] for names outside the catalog,
    /// [`ToolError::Unauthorized`] for scope gate denials,
    /// [`ToolError::InvalidParams`] for argument shape failures, and
    /// [`ToolError::NotFound`] or [`ToolError::Internal`] for store failures.
    pub fn handle_tool_call(
        &self,
        identity: &RequestIdentity,
        name: &str,
        arguments: Value,
    ) -> Result<Value, ToolError> {
        let tool =
            ToolName::parse(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let contract = self
            .contracts
            .iter()
            .find(|contract| contract.name == tool)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        self.gate.check(&identity.scopes, tool, &contract.required_scope)?;
        let arguments = normalize_arguments(arguments)?;
        match tool {
            ToolName::GetEmployee => self.handle_get_employee(arguments),
            ToolName::UpdateEmployee => self.handle_update_employee(arguments),
            ToolName::ListDepartments => self.handle_list_departments(),
            ToolName::GetSalary => self.handle_get_salary(arguments),
            ToolName::UpdateSalary => self.handle_update_salary(arguments),
            ToolName::GetOrgChart => self.handle_get_org_chart(),
            ToolName::ListEmployees => self.handle_list_employees(),
            ToolName::ListEmployeesWithSalaries => self.handle_list_employees_with_salaries(),
            ToolName::ListEmployeesByDepartment => self.handle_list_employees_by_department(),
        }
    }

    /// Handles `get_employee` requests.
    fn handle_get_employee(&self, arguments: Value) -> Result<Value, ToolError> {
        let params = decode::<GetEmployeeParams>(arguments)?;
        let employee = self.store.get_employee(&params.employee_id)?;
        serde_json::to_value(employee).map_err(|_| ToolError::Serialization)
    }

    /// Handles `update_employee` requests.
    fn handle_update_employee(&self, arguments: Value) -> Result<Value, ToolError> {
        let params = decode::<UpdateEmployeeParams>(arguments)?;
        let update = EmployeeUpdate {
            title: params.title,
            location: params.location,
        };
        let employee = self.store.update_employee(&params.employee_id, &update)?;
        serde_json::to_value(UpdateEmployeeResult {
            success: true,
            employee,
        })
        .map_err(|_| ToolError::Serialization)
    }

    /// Handles `list_departments` requests.
    fn handle_list_departments(&self) -> Result<Value, ToolError> {
        let departments = self.store.list_departments()?;
        serde_json::to_value(ListDepartmentsResult {
            departments,
        })
        .map_err(|_| ToolError::Serialization)
    }

    /// Handles `get_salary` requests.
    fn handle_get_salary(&self, arguments: Value) -> Result<Value, ToolError> {
        let params = decode::<GetSalaryParams>(arguments)?;
        let salary = self.store.get_salary(&params.employee_id)?;
        serde_json::to_value(salary).map_err(|_| ToolError::Serialization)
    }

    /// Handles `update_salary` requests.
    fn handle_update_salary(&self, arguments: Value) -> Result<Value, ToolError> {
        let params = decode::<UpdateSalaryParams>(arguments)?;
        let update = SalaryUpdate {
            base: params.base,
            bonus: params.bonus,
            equity: params.equity,
        };
        let salary = self.store.update_salary(&params.employee_id, &update)?;
        serde_json::to_value(UpdateSalaryResult {
            success: true,
            salary,
        })
        .map_err(|_| ToolError::Serialization)
    }

    /// Handles `get_org_chart` requests.
    fn handle_get_org_chart(&self) -> Result<Value, ToolError> {
        let departments = self.store.list_departments()?;
        let employees = self.store.list_employees()?;
        let mut by_id = BTreeMap::new();
        for department in departments {
            by_id.insert(department.id.clone(), department);
        }
        let mut by_department: BTreeMap<String, Vec<Employee>> = BTreeMap::new();
        for employee in employees {
            by_department.entry(employee.department.clone()).or_default().push(employee);
        }
        serde_json::to_value(OrgChartResult {
            departments: by_id,
            employees_by_department: by_department,
        })
        .map_err(|_| ToolError::Serialization)
    }

    /// Handles `list_employees` requests.
    fn handle_list_employees(&self) -> Result<Value, ToolError> {
        let employees = self.store.list_employees()?;
        let summaries: Vec<EmployeeSummary> = employees
            .into_iter()
            .map(|employee| EmployeeSummary {
                id: employee.id,
                name: employee.name,
            })
            .collect();
        let count = summaries.len();
        serde_json::to_value(ListEmployeesResult {
            employees: summaries,
            count,
        })
        .map_err(|_| ToolError::Serialization)
    }

    /// Handles `list_employees_with_salaries` requests.
    fn handle_list_employees_with_salaries(&self) -> Result<Value, ToolError> {
        let employees = self.store.list_employees()?;
        let mut rows = Vec::new();
        for employee in employees {
            let salary = match self.store.get_salary(&employee.id) {
                Ok(salary) => salary,
                // Employees without a salary record are skipped, not zero-filled.
                Err(err) if err.is_not_found() => continue,
                Err(err) => return Err(err.into()),
            };
            rows.push(CompensationRow {
                id: employee.id,
                name: employee.name,
                email: employee.email,
                title: employee.title,
                department: employee.department,
                location: employee.location,
                base_salary: salary.base,
                bonus: salary.bonus,
                equity: salary.equity,
                total_compensation: salary.base + salary.bonus + salary.equity,
            });
        }
        let count = rows.len();
        serde_json::to_value(CompensationReport {
            employees: rows,
            count,
        })
        .map_err(|_| ToolError::Serialization)
    }

    /// Handles `list_employees_by_department` requests.
    fn handle_list_employees_by_department(&self) -> Result<Value, ToolError> {
        let employees = self.store.list_employees()?;
        let count = employees.len();
        let mut departments: BTreeMap<String, Vec<DepartmentMember>> = BTreeMap::new();
        for employee in employees {
            departments.entry(employee.department.clone()).or_default().push(DepartmentMember {
                id: employee.id,
                name: employee.name,
                title: employee.title,
            });
        }
        serde_json::to_value(DepartmentRoster {
            departments,
            count,
        })
        .map_err(|_| ToolError::Serialization)
    }
}

// ============================================================================
// SECTION: Parameters
// ============================================================================

/// Parameters for `get_employee`.
#[derive(Debug, Deserialize)]
struct GetEmployeeParams {
    /// Employee identifier.
    employee_id: String,
}

/// Parameters for `update_employee`.
#[derive(Debug, Deserialize)]
struct UpdateEmployeeParams {
    /// Employee identifier.
    employee_id: String,
    /// New job title when present.
    title: Option<String>,
    /// New location when present.
    location: Option<String>,
}

/// Parameters for `get_salary`.
#[derive(Debug, Deserialize)]
struct GetSalaryParams {
    /// Employee identifier.
    employee_id: String,
}

/// Parameters for `update_salary`.
#[derive(Debug, Deserialize)]
struct UpdateSalaryParams {
    /// Employee identifier.
    employee_id: String,
    /// New base salary when present.
    base: Option<i64>,
    /// New bonus amount when present.
    bonus: Option<i64>,
    /// New equity amount when present.
    equity: Option<i64>,
}

// ============================================================================
// SECTION: Result Payloads
// ============================================================================

/// Result payload for `update_employee`.
#[derive(Debug, Serialize)]
struct UpdateEmployeeResult {
    /// Mutation success flag.
    success: bool,
    /// Post-mutation employee record.
    employee: Employee,
}

/// Result payload for `list_departments`.
#[derive(Debug, Serialize)]
struct ListDepartmentsResult {
    /// Department records in identifier order.
    departments: Vec<Department>,
}

/// Result payload for `update_salary`.
#[derive(Debug, Serialize)]
struct UpdateSalaryResult {
    /// Mutation success flag.
    success: bool,
    /// Post-mutation salary record.
    salary: Salary,
}

/// Result payload for `get_org_chart`.
#[derive(Debug, Serialize)]
struct OrgChartResult {
    /// Department records keyed by department identifier.
    departments: BTreeMap<String, Department>,
    /// Employee records grouped by department name.
    employees_by_department: BTreeMap<String, Vec<Employee>>,
}

/// Employee identifier and name pair.
#[derive(Debug, Serialize)]
struct EmployeeSummary {
    /// Employee identifier.
    id: String,
    /// Employee display name.
    name: String,
}

/// Result payload for `list_employees`.
#[derive(Debug, Serialize)]
struct ListEmployeesResult {
    /// Employee summaries in identifier order.
    employees: Vec<EmployeeSummary>,
    /// Number of employees listed.
    count: usize,
}

/// One employee row in the compensation report.
#[derive(Debug, Serialize)]
struct CompensationRow {
    /// Employee identifier.
    id: String,
    /// Employee display name.
    name: String,
    /// Employee contact address.
    email: String,
    /// Employee job title.
    title: String,
    /// Department name.
    department: String,
    /// Employee location.
    location: String,
    /// Base salary amount.
    base_salary: i64,
    /// Bonus amount.
    bonus: i64,
    /// Equity amount.
    equity: i64,
    /// Sum of base, bonus, and equity.
    total_compensation: i64,
}

/// Result payload for `list_employees_with_salaries`.
#[derive(Debug, Serialize)]
struct CompensationReport {
    /// Compensation rows in employee identifier order.
    employees: Vec<CompensationRow>,
    /// Number of rows included.
    count: usize,
}

/// One employee entry in the per-department grouping.
#[derive(Debug, Serialize)]
struct DepartmentMember {
    /// Employee identifier.
    id: String,
    /// Employee display name.
    name: String,
    /// Employee job title.
    title: String,
}

/// Result payload for `list_employees_by_department`.
#[derive(Debug, Serialize)]
struct DepartmentRoster {
    /// Members grouped by department name.
    departments: BTreeMap<String, Vec<DepartmentMember>>,
    /// Number of employees listed across all departments.
    count: usize,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Tool routing errors.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool name not present in the catalog.
    #[error("tool not found: {0}")]
    UnknownTool(String),
    /// Caller failed the scope gate.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Arguments failed structural decoding.
    #[error("invalid params: {0}")]
    InvalidParams(String),
    /// Referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// Result payload serialization failed.
    #[error("serialization failure")]
    Serialization,
    /// Store or runtime failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ToolError {
    fn from(error: StoreError) -> Self {
        if error.is_not_found() {
            Self::NotFound(error.to_string())
        } else {
            Self::Internal(error.to_string())
        }
    }
}

impl From<AuthError> for ToolError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Unauthorized(message) => Self::Unauthorized(message),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Decodes a JSON value into a typed parameter payload.
fn decode<T: for<'de> Deserialize<'de>>(payload: Value) -> Result<T, ToolError> {
    serde_json::from_value(payload).map_err(|err| ToolError::InvalidParams(err.to_string()))
}

/// Normalizes the arguments payload ahead of typed decoding.
///
/// Absent arguments arrive as JSON null and become an empty object; any
/// other non-object payload is rejected.
fn normalize_arguments(arguments: Value) -> Result<Value, ToolError> {
    match arguments {
        Value::Null => Ok(Value::Object(serde_json::Map::new())),
        Value::Object(map) => Ok(Value::Object(map)),
        _ => Err(ToolError::InvalidParams("arguments must be an object".to_string())),
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

    use roster_config::ScopesConfig;
    use roster_contract::tool_contracts;
    use roster_core::InMemoryDirectoryStore;
    use serde_json::json;

    use super::*;

    fn sample_router() -> ToolRouter {
        router_with_gate(ScopeGate::from_config(&ScopesConfig::default()))
    }

    fn router_with_gate(gate: ScopeGate) -> ToolRouter {
        ToolRouter::new(
            SharedDirectoryStore::from_store(InMemoryDirectoryStore::seeded()),
            Arc::new(tool_contracts()),
            gate,
        )
    }

    fn call(router: &ToolRouter, name: &str, arguments: Value) -> Result<Value, ToolError> {
        router.handle_tool_call(&RequestIdentity::anonymous(), name, arguments)
    }

    /// Verifies the full catalog is listed in registration order.
    #[test]
    fn list_tools_returns_full_catalog() {
        let router = sample_router();
        let tools = router.list_tools();
        assert_eq!(tools.len(), 9);
        let names: Vec<&str> = tools.iter().map(|tool| tool.name.as_str()).collect();
        let expected: Vec<&str> =
            ToolName::all().iter().map(|tool| tool.as_str()).collect();
        assert_eq!(names, expected);
    }

    /// Verifies a seeded employee record round-trips through the tool.
    #[test]
    fn get_employee_returns_seeded_record() {
        let router = sample_router();
        let result = call(&router, "get_employee", json!({"employee_id": "emp-001"})).unwrap();
        assert_eq!(result["name"], "Sarah Chen");
        assert_eq!(result["email"], "sarah.chen@corp.com");
        assert_eq!(result["department"], "Engineering");
        assert_eq!(result["manager_id"], "emp-010");
    }

    /// Verifies a missing required argument is an argument error.
    #[test]
    fn get_employee_without_id_is_invalid_params() {
        let router = sample_router();
        let err = call(&router, "get_employee", json!({})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
    }

    /// Verifies unknown tools fail distinctly from argument errors.
    #[test]
    fn unknown_tool_is_distinct_from_invalid_params() {
        let router = sample_router();
        let err = call(&router, "does_not_exist", json!({})).unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(name) if name == "does_not_exist"));
    }

    /// Verifies salary components are reported unsummed.
    #[test]
    fn get_salary_returns_components_unsummed() {
        let router = sample_router();
        let result = call(&router, "get_salary", json!({"employee_id": "emp-001"})).unwrap();
        assert_eq!(result["base"], 185_000);
        assert_eq!(result["bonus"], 25_000);
        assert_eq!(result["equity"], 50_000);
        assert!(result.get("total_compensation").is_none());
    }

    /// Verifies partial employee updates leave absent fields untouched.
    #[test]
    fn update_employee_merges_partial_fields() {
        let router = sample_router();
        let result = call(
            &router,
            "update_employee",
            json!({"employee_id": "emp-001", "title": "Principal Engineer"}),
        )
        .unwrap();
        assert_eq!(result["success"], true);
        assert_eq!(result["employee"]["title"], "Principal Engineer");
        assert_eq!(result["employee"]["location"], "San Francisco");
        let fetched = call(&router, "get_employee", json!({"employee_id": "emp-001"})).unwrap();
        assert_eq!(fetched["title"], "Principal Engineer");
    }

    /// Verifies the salary update accepts the equity component.
    #[test]
    fn update_salary_accepts_equity() {
        let router = sample_router();
        let result = call(
            &router,
            "update_salary",
            json!({"employee_id": "emp-002", "equity": 45000}),
        )
        .unwrap();
        assert_eq!(result["success"], true);
        assert_eq!(result["salary"]["equity"], 45_000);
        assert_eq!(result["salary"]["base"], 165_000);
    }

    /// Verifies updates on missing records surface as domain errors.
    #[test]
    fn update_missing_employee_is_not_found() {
        let router = sample_router();
        let err = call(
            &router,
            "update_employee",
            json!({"employee_id": "emp-999", "title": "Ghost"}),
        )
        .unwrap_err();
        assert!(matches!(&err, ToolError::NotFound(detail) if detail == "employee not found: emp-999"));
    }

    /// Verifies the org chart keys departments by id and groups by name.
    #[test]
    fn org_chart_groups_by_department_name() {
        let router = sample_router();
        let result = call(&router, "get_org_chart", json!({})).unwrap();
        assert!(result["departments"]["dept-eng"].is_object());
        assert_eq!(result["departments"]["dept-eng"]["name"], "Engineering");
        let engineering = result["employees_by_department"]["Engineering"].as_array().unwrap();
        assert_eq!(engineering.len(), 4);
    }

    /// Verifies the employee listing returns id and name pairs with a count.
    #[test]
    fn list_employees_counts_all_records() {
        let router = sample_router();
        let result = call(&router, "list_employees", json!({})).unwrap();
        assert_eq!(result["count"], 10);
        let employees = result["employees"].as_array().unwrap();
        assert_eq!(employees[0], json!({"id": "emp-001", "name": "Sarah Chen"}));
    }

    /// Verifies the compensation report skips employees without salaries and
    /// computes exact totals.
    #[test]
    fn compensation_report_skips_missing_salary() {
        let store = InMemoryDirectoryStore::seeded();
        store
            .insert_employee(Employee {
                id: "emp-020".to_string(),
                name: "Uncompensated Intern".to_string(),
                email: "intern@corp.com".to_string(),
                title: "Intern".to_string(),
                department: "Engineering".to_string(),
                manager_id: Some("emp-010".to_string()),
                start_date: "2025-06-01".to_string(),
                location: "Remote".to_string(),
            })
            .unwrap();
        let router = ToolRouter::new(
            SharedDirectoryStore::from_store(store),
            Arc::new(tool_contracts()),
            ScopeGate::from_config(&ScopesConfig::default()),
        );
        let result = call(&router, "list_employees_with_salaries", json!({})).unwrap();
        assert_eq!(result["count"], 10);
        let rows = result["employees"].as_array().unwrap();
        assert!(rows.iter().all(|row| row["id"] != "emp-020"));
        for row in rows {
            let total = row["base_salary"].as_i64().unwrap()
                + row["bonus"].as_i64().unwrap()
                + row["equity"].as_i64().unwrap();
            assert_eq!(row["total_compensation"].as_i64().unwrap(), total);
        }
        assert_eq!(rows[0]["total_compensation"], 260_000);
    }

    /// Verifies the per-department grouping includes titles and a total count.
    #[test]
    fn department_roster_groups_members() {
        let router = sample_router();
        let result = call(&router, "list_employees_by_department", json!({})).unwrap();
        assert_eq!(result["count"], 10);
        let sales = result["departments"]["Sales"].as_array().unwrap();
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0]["title"], "Sales Director");
    }

    /// Verifies null arguments are treated as an empty object.
    #[test]
    fn null_arguments_allowed_for_parameterless_tools() {
        let router = sample_router();
        let result = call(&router, "list_departments", Value::Null).unwrap();
        assert_eq!(result["departments"].as_array().unwrap().len(), 4);
    }

    /// Verifies non-object arguments are rejected as argument errors.
    #[test]
    fn non_object_arguments_rejected() {
        let router = sample_router();
        let err = call(&router, "get_employee", json!("emp-001")).unwrap_err();
        assert!(matches!(&err, ToolError::InvalidParams(detail) if detail == "arguments must be an object"));
    }

    /// Verifies the scope gate runs before argument decoding.
    #[test]
    fn scope_gate_denies_before_decoding() {
        let router = router_with_gate(ScopeGate::from_config(&ScopesConfig {
            enforce: true,
            deny_tools: Vec::new(),
        }));
        let err = call(&router, "get_salary", json!({})).unwrap_err();
        assert!(matches!(err, ToolError::Unauthorized(_)));
    }

    /// Verifies deny rules block execution even with the scope granted.
    #[test]
    fn deny_list_blocks_tool_execution() {
        let router = router_with_gate(ScopeGate::from_config(&ScopesConfig {
            enforce: false,
            deny_tools: vec!["update_salary".to_string()],
        }));
        let identity =
            RequestIdentity::anonymous().with_scopes(vec!["hr:salary:write".to_string()]);
        let err = router
            .handle_tool_call(
                &identity,
                "update_salary",
                json!({"employee_id": "emp-001", "base": 1}),
            )
            .unwrap_err();
        assert!(matches!(&err, ToolError::Unauthorized(detail) if detail.contains("denied by policy")));
    }
}
