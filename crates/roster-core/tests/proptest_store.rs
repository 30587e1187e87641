// crates/roster-core/tests/proptest_store.rs
// ============================================================================
// Module: Directory Store Property-Based Tests
// Description: Property tests for partial-update merges and scope parsing.
// Purpose: Detect merge and parsing invariant violations across wide inputs.
// ============================================================================

//! Property-based tests for directory store invariants.

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
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use roster_core::DirectoryStore;
use roster_core::EmployeeUpdate;
use roster_core::InMemoryDirectoryStore;
use roster_core::SalaryUpdate;
use roster_core::parse_scopes;

/// Strategy for optional free-text update fields.
fn optional_text() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), "[A-Za-z][A-Za-z ]{0,24}".prop_map(Some)]
}

/// Strategy for optional compensation amounts.
fn optional_amount() -> impl Strategy<Value = Option<i64>> {
    prop_oneof![Just(None), (0_i64 ..= 1_000_000_i64).prop_map(Some)]
}

proptest! {
    #[test]
    fn employee_update_touches_only_provided_fields(
        title in optional_text(),
        location in optional_text(),
    ) {
        let store = InMemoryDirectoryStore::seeded();
        let before = store.get_employee("emp-001").unwrap();

        let update = EmployeeUpdate { title: title.clone(), location: location.clone() };
        let after = store.update_employee("emp-001", &update).unwrap();

        prop_assert_eq!(&after.title, title.as_ref().unwrap_or(&before.title));
        prop_assert_eq!(&after.location, location.as_ref().unwrap_or(&before.location));
        prop_assert_eq!(&after.id, &before.id);
        prop_assert_eq!(&after.name, &before.name);
        prop_assert_eq!(&after.email, &before.email);
        prop_assert_eq!(&after.department, &before.department);
        prop_assert_eq!(&after.manager_id, &before.manager_id);
        prop_assert_eq!(&after.start_date, &before.start_date);

        let reread = store.get_employee("emp-001").unwrap();
        prop_assert_eq!(reread, after);
    }

    #[test]
    fn salary_update_touches_only_provided_components(
        base in optional_amount(),
        bonus in optional_amount(),
        equity in optional_amount(),
    ) {
        let store = InMemoryDirectoryStore::seeded();
        let before = store.get_salary("emp-003").unwrap();

        let update = SalaryUpdate { base, bonus, equity };
        let after = store.update_salary("emp-003", &update).unwrap();

        prop_assert_eq!(after.base, base.unwrap_or(before.base));
        prop_assert_eq!(after.bonus, bonus.unwrap_or(before.bonus));
        prop_assert_eq!(after.equity, equity.unwrap_or(before.equity));
        prop_assert_eq!(&after.employee_id, &before.employee_id);
    }

    #[test]
    fn updates_never_insert_for_unknown_identifiers(
        id in "emp-9[0-9]{2}",
        title in optional_text(),
    ) {
        let store = InMemoryDirectoryStore::seeded();
        let update = EmployeeUpdate { title, location: None };
        let result = store.update_employee(&id, &update);
        prop_assert!(result.is_err());
        prop_assert_eq!(store.list_employees().unwrap().len(), 10);
    }

    #[test]
    fn parse_scopes_round_trips_space_joined_labels(
        labels in prop::collection::vec("[a-z]{1,6}(:[a-z]{1,6}){0,2}", 0 .. 6),
    ) {
        let header = labels.join(" ");
        let parsed = parse_scopes(&header);
        prop_assert_eq!(parsed, labels);
    }

    #[test]
    fn parse_scopes_ignores_extra_whitespace(
        labels in prop::collection::vec("[a-z]{1,6}", 1 .. 4),
        padding in prop::collection::vec(" {1,3}", 1 .. 4),
    ) {
        let mut header = String::new();
        for (index, label) in labels.iter().enumerate() {
            header.push_str(padding.get(index % padding.len()).map_or(" ", String::as_str));
            header.push_str(label);
        }
        header.push(' ');
        let parsed = parse_scopes(&header);
        prop_assert_eq!(parsed, labels);
    }
}
