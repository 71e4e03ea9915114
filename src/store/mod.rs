//! Storage ports.
//!
//! Employees and payslips live in external stores. The engine talks to them
//! through [`EmployeeStore`] and [`PayslipStore`]; [`InMemoryStore`] is a
//! reference implementation used by tests and the HTTP adapter.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{EmployeeSnapshot, NewPayslip, PayPeriod, Payslip};

/// Errors reported by a store implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The unique `(employee_id, period)` index rejected an insert.
    #[error("Unique constraint violated for employee '{employee_id}' and period {period}")]
    ConstraintViolation {
        /// The employee of the rejected row.
        employee_id: String,
        /// The period of the rejected row.
        period: NaiveDate,
    },

    /// Any other backend failure.
    #[error("Store backend failure: {message}")]
    Backend {
        /// Backend error message.
        message: String,
    },
}

/// Read access to employees.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Fetches an employee by id.
    async fn get_employee(&self, employee_id: &str) -> Result<Option<EmployeeSnapshot>, StoreError>;
}

/// Persistence for payslips.
///
/// Implementations must enforce uniqueness of `(employee_id, period)` at
/// insert time and report a violation as [`StoreError::ConstraintViolation`].
#[async_trait]
pub trait PayslipStore: Send + Sync {
    /// Finds the payslip for an employee and period, if one exists.
    async fn find_by_employee_and_period(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> Result<Option<Payslip>, StoreError>;

    /// Inserts a payslip and returns it with its assigned id.
    async fn insert(&self, payslip: NewPayslip) -> Result<Payslip, StoreError>;

    /// Fetches a payslip by id.
    async fn get(&self, payslip_id: i64) -> Result<Option<Payslip>, StoreError>;

    /// Lists an employee's payslips, most recent period first.
    async fn list_for_employee(&self, employee_id: &str) -> Result<Vec<Payslip>, StoreError>;
}
