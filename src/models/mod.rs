//! Core data models for the Payroll Generation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod employee;
mod money;
mod payslip;
mod period;

pub use calculation_result::{AuditStep, PayslipCalculation};
pub use employee::{EmployeeSnapshot, EmploymentType};
pub use money::{MONEY_SCALE, Money};
pub use payslip::{NewPayslip, Payslip, PayslipFields};
pub use period::PayPeriod;
