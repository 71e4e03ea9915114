//! Request types for the Payroll Generation Engine API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Money;
use crate::service::GeneratePayslipRequest;

/// Request body for `POST /payslips`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePayslipBody {
    /// The employee to pay.
    pub employee_id: String,
    /// Any date inside the requested month (e.g., "2024-03-17").
    pub period: NaiveDate,
    /// Overtime hours worked; defaults to zero.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Bonus amount; defaults to zero. At most two fractional digits.
    #[serde(default = "Money::zero")]
    pub bonus: Money,
}

impl From<GeneratePayslipBody> for GeneratePayslipRequest {
    fn from(body: GeneratePayslipBody) -> Self {
        GeneratePayslipRequest {
            employee_id: body.employee_id,
            period: body.period,
            overtime_hours: body.overtime_hours,
            bonus: body.bonus,
        }
    }
}
