// crates/roster-core/src/store.rs
// ============================================================================
// Module: Directory Store
// Description: Store contract and in-memory directory implementation.
// Purpose: Provide concurrency-safe record access for the serving layer.
// Dependencies: crate::records, crate::seed
// ============================================================================

//! ## Overview
//! The [`DirectoryStore`] trait is the only storage surface the serving
//! layer sees. [`InMemoryDirectoryStore`] implements it with a single
//! readers-writer lock over the whole directory state; partial updates are
//! applied inside the write lock so concurrent writers to the same record
//! serialize cleanly. Updates never insert.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use thiserror::Error;

use crate::records::Department;
use crate::records::Employee;
use crate::records::EmployeeUpdate;
use crate::records::Salary;
use crate::records::SalaryUpdate;
use crate::seed;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Directory store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No employee record exists for the identifier.
    #[error("employee not found: {0}")]
    EmployeeNotFound(String),
    /// No department record exists for the identifier.
    #[error("department not found: {0}")]
    DepartmentNotFound(String),
    /// No salary record exists for the employee identifier.
    #[error("salary not found for employee: {0}")]
    SalaryNotFound(String),
    /// The store lock was poisoned by a panicking writer.
    #[error("directory store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Returns `true` for the record-missing variants.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EmployeeNotFound(_) | Self::DepartmentNotFound(_) | Self::SalaryNotFound(_)
        )
    }
}

// ============================================================================
// SECTION: Store Contract
// ============================================================================

/// Read and update access to directory records.
///
/// Implementations must return clones; callers never observe references
/// into live store state. List results are ordered by identifier.
pub trait DirectoryStore {
    /// Fetches an employee by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmployeeNotFound`] when the identifier is unknown.
    fn get_employee(&self, id: &str) -> Result<Employee, StoreError>;

    /// Fetches a department by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DepartmentNotFound`] when the identifier is unknown.
    fn get_department(&self, id: &str) -> Result<Department, StoreError>;

    /// Fetches the salary record for an employee.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SalaryNotFound`] when the employee has no
    /// salary record.
    fn get_salary(&self, employee_id: &str) -> Result<Salary, StoreError>;

    /// Lists all employees ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LockPoisoned`] when the store lock is poisoned.
    fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;

    /// Lists all departments ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LockPoisoned`] when the store lock is poisoned.
    fn list_departments(&self) -> Result<Vec<Department>, StoreError>;

    /// Lists all salary records ordered by employee identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LockPoisoned`] when the store lock is poisoned.
    fn list_salaries(&self) -> Result<Vec<Salary>, StoreError>;

    /// Applies a partial update to an existing employee and returns the
    /// updated record. Never inserts.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmployeeNotFound`] when the identifier is
    /// unknown; the store is left unchanged.
    fn update_employee(&self, id: &str, update: &EmployeeUpdate) -> Result<Employee, StoreError>;

    /// Applies a partial update to an existing salary record and returns
    /// the updated record. Never inserts.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SalaryNotFound`] when the employee has no
    /// salary record; the store is left unchanged.
    fn update_salary(
        &self,
        employee_id: &str,
        update: &SalaryUpdate,
    ) -> Result<Salary, StoreError>;
}

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// Mutable directory state guarded by the store lock.
#[derive(Debug, Default)]
struct DirectoryState {
    /// Employee records keyed by employee identifier.
    employees: BTreeMap<String, Employee>,
    /// Department records keyed by department identifier.
    departments: BTreeMap<String, Department>,
    /// Salary records keyed by employee identifier.
    salaries: BTreeMap<String, Salary>,
}

/// In-memory directory store guarded by a single readers-writer lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectoryStore {
    /// Directory state; reads share the lock, updates take it exclusively.
    state: Arc<RwLock<DirectoryState>>,
}

impl InMemoryDirectoryStore {
    /// Creates an empty directory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory store loaded with the built-in dataset.
    #[must_use]
    pub fn seeded() -> Self {
        let store = Self::new();
        {
            let mut guard = match store.state.write() {
                Ok(guard) => guard,
                // A freshly created lock cannot be poisoned.
                Err(poisoned) => poisoned.into_inner(),
            };
            for department in seed::departments() {
                guard.departments.insert(department.id.clone(), department);
            }
            for employee in seed::employees() {
                guard.employees.insert(employee.id.clone(), employee);
            }
            for salary in seed::salaries() {
                guard.salaries.insert(salary.employee_id.clone(), salary);
            }
        }
        store
    }

    /// Inserts or replaces an employee record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LockPoisoned`] when the store lock is poisoned.
    pub fn insert_employee(&self, employee: Employee) -> Result<(), StoreError> {
        let mut guard = self.write_state()?;
        guard.employees.insert(employee.id.clone(), employee);
        drop(guard);
        Ok(())
    }

    /// Inserts or replaces a department record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LockPoisoned`] when the store lock is poisoned.
    pub fn insert_department(&self, department: Department) -> Result<(), StoreError> {
        let mut guard = self.write_state()?;
        guard.departments.insert(department.id.clone(), department);
        drop(guard);
        Ok(())
    }

    /// Inserts or replaces a salary record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LockPoisoned`] when the store lock is poisoned.
    pub fn insert_salary(&self, salary: Salary) -> Result<(), StoreError> {
        let mut guard = self.write_state()?;
        guard.salaries.insert(salary.employee_id.clone(), salary);
        drop(guard);
        Ok(())
    }

    /// Removes the salary record for an employee, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LockPoisoned`] when the store lock is poisoned.
    pub fn remove_salary(&self, employee_id: &str) -> Result<(), StoreError> {
        let mut guard = self.write_state()?;
        guard.salaries.remove(employee_id);
        drop(guard);
        Ok(())
    }

    /// Acquires the shared read guard.
    fn read_state(&self) -> Result<RwLockReadGuard<'_, DirectoryState>, StoreError> {
        self.state.read().map_err(|_| StoreError::LockPoisoned)
    }

    /// Acquires the exclusive write guard.
    fn write_state(&self) -> Result<RwLockWriteGuard<'_, DirectoryState>, StoreError> {
        self.state.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl DirectoryStore for InMemoryDirectoryStore {
    fn get_employee(&self, id: &str) -> Result<Employee, StoreError> {
        let guard = self.read_state()?;
        guard.employees.get(id).cloned().ok_or_else(|| StoreError::EmployeeNotFound(id.to_string()))
    }

    fn get_department(&self, id: &str) -> Result<Department, StoreError> {
        let guard = self.read_state()?;
        guard
            .departments
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::DepartmentNotFound(id.to_string()))
    }

    fn get_salary(&self, employee_id: &str) -> Result<Salary, StoreError> {
        let guard = self.read_state()?;
        guard
            .salaries
            .get(employee_id)
            .cloned()
            .ok_or_else(|| StoreError::SalaryNotFound(employee_id.to_string()))
    }

    fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let guard = self.read_state()?;
        Ok(guard.employees.values().cloned().collect())
    }

    fn list_departments(&self) -> Result<Vec<Department>, StoreError> {
        let guard = self.read_state()?;
        Ok(guard.departments.values().cloned().collect())
    }

    fn list_salaries(&self) -> Result<Vec<Salary>, StoreError> {
        let guard = self.read_state()?;
        Ok(guard.salaries.values().cloned().collect())
    }

    fn update_employee(&self, id: &str, update: &EmployeeUpdate) -> Result<Employee, StoreError> {
        let mut guard = self.write_state()?;
        let employee = guard
            .employees
            .get_mut(id)
            .ok_or_else(|| StoreError::EmployeeNotFound(id.to_string()))?;
        if let Some(title) = &update.title {
            employee.title.clone_from(title);
        }
        if let Some(location) = &update.location {
            employee.location.clone_from(location);
        }
        Ok(employee.clone())
    }

    fn update_salary(
        &self,
        employee_id: &str,
        update: &SalaryUpdate,
    ) -> Result<Salary, StoreError> {
        let mut guard = self.write_state()?;
        let salary = guard
            .salaries
            .get_mut(employee_id)
            .ok_or_else(|| StoreError::SalaryNotFound(employee_id.to_string()))?;
        if let Some(base) = update.base {
            salary.base = base;
        }
        if let Some(bonus) = update.bonus {
            salary.bonus = bonus;
        }
        if let Some(equity) = update.equity {
            salary.equity = equity;
        }
        Ok(salary.clone())
    }
}

// ============================================================================
// SECTION: Shared Store Wrapper
// ============================================================================

/// Shared directory store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedDirectoryStore {
    /// Inner store implementation.
    inner: Arc<dyn DirectoryStore + Send + Sync>,
}

impl SharedDirectoryStore {
    /// Wraps a directory store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl DirectoryStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn DirectoryStore + Send + Sync>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl DirectoryStore for SharedDirectoryStore {
    fn get_employee(&self, id: &str) -> Result<Employee, StoreError> {
        self.inner.get_employee(id)
    }

    fn get_department(&self, id: &str) -> Result<Department, StoreError> {
        self.inner.get_department(id)
    }

    fn get_salary(&self, employee_id: &str) -> Result<Salary, StoreError> {
        self.inner.get_salary(employee_id)
    }

    fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        self.inner.list_employees()
    }

    fn list_departments(&self) -> Result<Vec<Department>, StoreError> {
        self.inner.list_departments()
    }

    fn list_salaries(&self) -> Result<Vec<Salary>, StoreError> {
        self.inner.list_salaries()
    }

    fn update_employee(&self, id: &str, update: &EmployeeUpdate) -> Result<Employee, StoreError> {
        self.inner.update_employee(id, update)
    }

    fn update_salary(
        &self,
        employee_id: &str,
        update: &SalaryUpdate,
    ) -> Result<Salary, StoreError> {
        self.inner.update_salary(employee_id, update)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
