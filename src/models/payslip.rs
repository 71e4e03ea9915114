//! Payslip records.
//!
//! A [`Payslip`] is created exactly once and never mutated. Every monetary
//! field is fixed at creation; in particular `base_salary` is a snapshot of
//! the employee's salary at generation time.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Money, PayPeriod};

/// Computed monetary fields of a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipFields {
    /// Base salary copied from the employee at generation time.
    pub base_salary: Money,
    /// Overtime hours supplied by the caller.
    pub overtime_hours: Decimal,
    /// Overtime hours multiplied by the flat overtime rate.
    pub overtime_pay: Money,
    /// Bonus supplied by the caller.
    pub bonus: Money,
    /// EPF deduction.
    pub epf: Money,
    /// SOCSO deduction.
    pub socso: Money,
    /// Net pay: base + overtime + bonus - EPF - SOCSO.
    pub total_pay: Money,
}

/// A payslip ready to be inserted; the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayslip {
    /// The owning employee.
    pub employee_id: String,
    /// The normalized pay period.
    pub period: PayPeriod,
    /// The computed fields.
    pub fields: PayslipFields,
    /// When the payslip was generated.
    pub generated_at: DateTime<Utc>,
}

impl NewPayslip {
    /// Builds the stored record with the id assigned by the store.
    pub fn into_payslip(self, id: i64) -> Payslip {
        let PayslipFields {
            base_salary,
            overtime_hours,
            overtime_pay,
            bonus,
            epf,
            socso,
            total_pay,
        } = self.fields;

        Payslip {
            id,
            employee_id: self.employee_id,
            period: self.period,
            base_salary,
            overtime_hours,
            overtime_pay,
            bonus,
            epf,
            socso,
            total_pay,
            generated_at: self.generated_at,
        }
    }
}

/// A persisted payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Surrogate identifier assigned by the store.
    pub id: i64,
    /// The owning employee.
    pub employee_id: String,
    /// The pay period (first day of the month).
    pub period: PayPeriod,
    /// Snapshot of the employee's base salary.
    pub base_salary: Money,
    /// Overtime hours worked.
    pub overtime_hours: Decimal,
    /// Overtime pay.
    pub overtime_pay: Money,
    /// Bonus.
    pub bonus: Money,
    /// EPF deduction.
    pub epf: Money,
    /// SOCSO deduction.
    pub socso: Money,
    /// Net pay.
    pub total_pay: Money,
    /// When the payslip was generated.
    pub generated_at: DateTime<Utc>,
}

impl Payslip {
    /// Base salary plus overtime pay plus bonus.
    pub fn total_earnings(&self) -> Money {
        self.base_salary + self.overtime_pay + self.bonus
    }

    /// EPF plus SOCSO.
    pub fn total_deductions(&self) -> Money {
        self.epf + self.socso
    }
}
