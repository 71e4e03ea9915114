//! Error types for the Payroll Generation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while generating and rendering
//! payslips.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Payroll Generation Engine.
///
/// Business rule violations (a duplicate period, a missing employee) are
/// ordinary variants of this type, so callers handle them like any other
/// outcome.
///
/// # Example
///
/// ```
/// use payslip_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "E001".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: E001");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A caller-supplied value was outside its documented domain.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The referenced employee does not exist in the employee store.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee identifier that was not found.
        employee_id: String,
    },

    /// The referenced payslip does not exist in the payslip store.
    #[error("Payslip not found: {payslip_id}")]
    PayslipNotFound {
        /// The payslip identifier that was not found.
        payslip_id: i64,
    },

    /// A payslip already exists for this employee and period.
    #[error("Payslip for employee '{employee_id}' and period {period} already exists")]
    DuplicatePeriod {
        /// The employee identifier.
        employee_id: String,
        /// The first day of the duplicated period.
        period: NaiveDate,
    },

    /// The persistence layer failed. Never retried by the engine.
    #[error("Persistence failure: {message}")]
    PersistenceFailure {
        /// A description of the storage fault.
        message: String,
    },

    /// A document could not be encoded by the rendering capability.
    #[error("Render failure: {message}")]
    RenderFailure {
        /// A description of the encoding fault.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or failed validation.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
