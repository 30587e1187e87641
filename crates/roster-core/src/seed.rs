// crates/roster-core/src/seed.rs
// ============================================================================
// Module: Seed Dataset
// Description: Built-in directory dataset loaded by the seeded store.
// Purpose: Provide a stable, deterministic dataset for serving and tests.
// Dependencies: crate::records
// ============================================================================

//! ## Overview
//! The fixed dataset behind [`crate::store::InMemoryDirectoryStore::seeded`].
//! Identifiers and amounts are stable across releases; fixtures and demos
//! depend on these exact values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::records::Department;
use crate::records::Employee;
use crate::records::Salary;

// ============================================================================
// SECTION: Departments
// ============================================================================

/// Returns the seed departments in identifier order.
pub(crate) fn departments() -> Vec<Department> {
    vec![
        Department {
            id: "dept-eng".to_string(),
            name: "Engineering".to_string(),
            head_id: "emp-010".to_string(),
            budget: 5_000_000,
        },
        Department {
            id: "dept-hr".to_string(),
            name: "Human Resources".to_string(),
            head_id: "emp-012".to_string(),
            budget: 1_000_000,
        },
        Department {
            id: "dept-prod".to_string(),
            name: "Product".to_string(),
            head_id: "emp-011".to_string(),
            budget: 2_000_000,
        },
        Department {
            id: "dept-sales".to_string(),
            name: "Sales".to_string(),
            head_id: "emp-013".to_string(),
            budget: 3_000_000,
        },
    ]
}

// ============================================================================
// SECTION: Employees
// ============================================================================

/// Returns the seed employees in identifier order.
#[allow(clippy::too_many_lines, reason = "Literal dataset rows are clearer unsplit.")]
pub(crate) fn employees() -> Vec<Employee> {
    vec![
        Employee {
            id: "emp-001".to_string(),
            name: "Sarah Chen".to_string(),
            email: "sarah.chen@corp.com".to_string(),
            title: "Senior Engineer".to_string(),
            department: "Engineering".to_string(),
            manager_id: Some("emp-010".to_string()),
            start_date: "2021-03-15".to_string(),
            location: "San Francisco".to_string(),
        },
        Employee {
            id: "emp-002".to_string(),
            name: "Marcus Johnson".to_string(),
            email: "marcus.johnson@corp.com".to_string(),
            title: "Product Manager".to_string(),
            department: "Product".to_string(),
            manager_id: Some("emp-011".to_string()),
            start_date: "2020-08-01".to_string(),
            location: "New York".to_string(),
        },
        Employee {
            id: "emp-003".to_string(),
            name: "Priya Patel".to_string(),
            email: "priya.patel@corp.com".to_string(),
            title: "Staff Engineer".to_string(),
            department: "Engineering".to_string(),
            manager_id: Some("emp-010".to_string()),
            start_date: "2019-01-10".to_string(),
            location: "Seattle".to_string(),
        },
        Employee {
            id: "emp-004".to_string(),
            name: "James Lee".to_string(),
            email: "james.lee@corp.com".to_string(),
            title: "Sales Director".to_string(),
            department: "Sales".to_string(),
            manager_id: Some("emp-013".to_string()),
            start_date: "2018-05-20".to_string(),
            location: "Austin".to_string(),
        },
        Employee {
            id: "emp-005".to_string(),
            name: "Emma Wilson".to_string(),
            email: "emma.wilson@corp.com".to_string(),
            title: "HR Specialist".to_string(),
            department: "Human Resources".to_string(),
            manager_id: Some("emp-012".to_string()),
            start_date: "2022-02-01".to_string(),
            location: "Chicago".to_string(),
        },
        Employee {
            id: "emp-010".to_string(),
            name: "David Park".to_string(),
            email: "david.park@corp.com".to_string(),
            title: "VP Engineering".to_string(),
            department: "Engineering".to_string(),
            manager_id: None,
            start_date: "2017-03-01".to_string(),
            location: "San Francisco".to_string(),
        },
        Employee {
            id: "emp-011".to_string(),
            name: "Lisa Martinez".to_string(),
            email: "lisa.martinez@corp.com".to_string(),
            title: "VP Product".to_string(),
            department: "Product".to_string(),
            manager_id: None,
            start_date: "2018-09-15".to_string(),
            location: "New York".to_string(),
        },
        Employee {
            id: "emp-012".to_string(),
            name: "Robert Taylor".to_string(),
            email: "robert.taylor@corp.com".to_string(),
            title: "VP Human Resources".to_string(),
            department: "Human Resources".to_string(),
            manager_id: None,
            start_date: "2019-06-01".to_string(),
            location: "Chicago".to_string(),
        },
        Employee {
            id: "emp-013".to_string(),
            name: "Jennifer Adams".to_string(),
            email: "jennifer.adams@corp.com".to_string(),
            title: "VP Sales".to_string(),
            department: "Sales".to_string(),
            manager_id: None,
            start_date: "2017-11-10".to_string(),
            location: "Austin".to_string(),
        },
        Employee {
            id: "emp-014".to_string(),
            name: "Michael Brown".to_string(),
            email: "michael.brown@corp.com".to_string(),
            title: "Junior Engineer".to_string(),
            department: "Engineering".to_string(),
            manager_id: Some("emp-010".to_string()),
            start_date: "2023-01-15".to_string(),
            location: "Seattle".to_string(),
        },
    ]
}

// ============================================================================
// SECTION: Salaries
// ============================================================================

/// Returns the seed salaries in employee identifier order.
pub(crate) fn salaries() -> Vec<Salary> {
    [
        ("emp-001", 185_000, 25_000, 50_000),
        ("emp-002", 165_000, 20_000, 40_000),
        ("emp-003", 205_000, 30_000, 60_000),
        ("emp-004", 155_000, 50_000, 30_000),
        ("emp-005", 95_000, 10_000, 15_000),
        ("emp-010", 285_000, 75_000, 150_000),
        ("emp-011", 275_000, 70_000, 140_000),
        ("emp-012", 245_000, 60_000, 120_000),
        ("emp-013", 265_000, 100_000, 130_000),
        ("emp-014", 125_000, 10_000, 25_000),
    ]
    .into_iter()
    .map(|(employee_id, base, bonus, equity)| Salary {
        employee_id: employee_id.to_string(),
        base,
        bonus,
        equity,
    })
    .collect()
}
