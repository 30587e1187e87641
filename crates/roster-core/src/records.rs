// crates/roster-core/src/records.rs
// ============================================================================
// Module: Directory Records
// Description: Employee, department, and compensation record types.
// Purpose: Define the wire-visible directory domain shared across crates.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Record types for the employee directory. Field names are part of the
//! external contract surface: tool results serialize these structs directly,
//! so renames here are wire-visible changes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Records
// ============================================================================

/// An employee directory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee identifier, e.g. `emp-001`.
    pub id: String,
    /// Full display name.
    pub name: String,
    /// Work email address.
    pub email: String,
    /// Current job title.
    pub title: String,
    /// Department name the employee belongs to, e.g. `Engineering`.
    pub department: String,
    /// Manager's employee identifier; absent for top-level roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
    /// Start date as an ISO `YYYY-MM-DD` string.
    pub start_date: String,
    /// Office location.
    pub location: String,
}

/// An organizational unit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Department identifier, e.g. `dept-eng`.
    pub id: String,
    /// Department display name.
    pub name: String,
    /// Employee identifier of the department head.
    pub head_id: String,
    /// Annual budget in whole currency units.
    pub budget: i64,
}

/// A compensation record for a single employee.
///
/// Components are stored separately and never pre-summed; only reporting
/// tools compute totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salary {
    /// Employee identifier this record belongs to.
    pub employee_id: String,
    /// Base salary in whole currency units.
    pub base: i64,
    /// Annual bonus in whole currency units.
    pub bonus: i64,
    /// Equity grant value in whole currency units.
    pub equity: i64,
}

// ============================================================================
// SECTION: Partial Updates
// ============================================================================

/// A partial update to an [`Employee`]; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    /// New job title, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New office location, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl EmployeeUpdate {
    /// Returns `true` when no field is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.location.is_none()
    }
}

/// A partial update to a [`Salary`]; absent components are left unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryUpdate {
    /// New base salary, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<i64>,
    /// New bonus amount, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus: Option<i64>,
    /// New equity amount, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity: Option<i64>,
}

impl SalaryUpdate {
    /// Returns `true` when no component is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.base.is_none() && self.bonus.is_none() && self.equity.is_none()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
