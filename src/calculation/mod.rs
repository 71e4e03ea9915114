//! Calculation logic for the Payroll Generation Engine.
//!
//! This module contains the pure computations of the engine: payslip field
//! calculation (flat overtime rate, EPF and SOCSO deductions, net pay) and
//! conversion of amounts into English words.

mod amount_words;
mod payroll;

pub use amount_words::{amount_to_words, integer_to_words};
pub use payroll::{OVERTIME_HOURS_SCALE, calculate_payslip, validate_adjustments};
