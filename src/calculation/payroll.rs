//! Payslip field calculation.
//!
//! This module turns an employee snapshot, overtime hours and a bonus into the
//! monetary fields of a payslip. Overtime is paid at a flat hourly rate that
//! depends only on the employment type; EPF and SOCSO are fixed fractions of
//! the base salary.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PayrollRates;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, EmployeeSnapshot, Money, PayslipCalculation, PayslipFields};

/// Maximum number of fractional digits accepted for overtime hours.
pub const OVERTIME_HOURS_SCALE: u32 = 2;

/// Calculates the payslip fields for an employee.
///
/// Each derived amount is rounded exactly once, half away from zero, to two
/// places. The net pay is the exact sum of already-rounded components.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if:
/// - `overtime_hours` is negative, above `rates.max_overtime_hours`, or has
///   more than two fractional digits
/// - `bonus` is negative
/// - the employee's base salary is negative
/// - an amount is too large to be held with two fractional digits
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_payslip;
/// use payslip_engine::config::PayrollRates;
/// use payslip_engine::models::{EmployeeSnapshot, EmploymentType, Money};
/// use rust_decimal::Decimal;
///
/// let employee = EmployeeSnapshot {
///     id: "E001".to_string(),
///     name: "Aisyah Rahman".to_string(),
///     department: "Finance".to_string(),
///     position: "Accountant".to_string(),
///     base_salary: Money::from_cents(300_000),
///     employment_type: EmploymentType::FullTime,
/// };
///
/// let result = calculate_payslip(&employee, Decimal::from(4), Money::zero(), &PayrollRates::default()).unwrap();
/// assert_eq!(result.fields.overtime_pay.to_string(), "80.00");
/// assert_eq!(result.fields.epf.to_string(), "330.00");
/// assert_eq!(result.fields.socso.to_string(), "15.00");
/// assert_eq!(result.fields.total_pay.to_string(), "2735.00");
/// ```
pub fn calculate_payslip(
    employee: &EmployeeSnapshot,
    overtime_hours: Decimal,
    bonus: Money,
    rates: &PayrollRates,
) -> EngineResult<PayslipCalculation> {
    validate_inputs(employee, overtime_hours, bonus, rates)?;

    let base_salary = employee.base_salary;
    let overtime_rate = rates.overtime.for_employment_type(employee.employment_type);

    let overtime_pay = Money::round(checked_product(
        overtime_rate.amount(),
        overtime_hours,
        "overtime_hours",
    )?)?;
    let epf = Money::round(checked_product(
        base_salary.amount(),
        rates.epf_rate,
        "base_salary",
    )?)?;
    let socso = Money::round(checked_product(
        base_salary.amount(),
        rates.socso_rate,
        "base_salary",
    )?)?;
    let total_pay = base_salary
        .checked_add(overtime_pay)
        .and_then(|sum| sum.checked_add(bonus))
        .and_then(|sum| sum.checked_sub(epf))
        .and_then(|sum| sum.checked_sub(socso))
        .ok_or_else(|| EngineError::invalid_input("bonus", "total pay is too large"))?;

    debug!(
        employee_id = %employee.id,
        overtime_pay = %overtime_pay,
        epf = %epf,
        socso = %socso,
        total_pay = %total_pay,
        "Calculated payslip fields"
    );

    let audit_steps = vec![
        AuditStep {
            step_number: 1,
            rule_id: "overtime_pay".to_string(),
            rule_name: "Flat Overtime Rate".to_string(),
            input: serde_json::json!({
                "overtime_hours": overtime_hours.normalize().to_string(),
                "employment_type": employee.employment_type,
                "overtime_rate": overtime_rate.to_string()
            }),
            output: serde_json::json!({ "overtime_pay": overtime_pay.to_string() }),
            reasoning: format!(
                "{} h x ${}/h = ${}",
                overtime_hours.normalize(),
                overtime_rate,
                overtime_pay
            ),
        },
        rate_step(2, "epf", "EPF Deduction", base_salary, rates.epf_rate, epf),
        rate_step(3, "socso", "SOCSO Deduction", base_salary, rates.socso_rate, socso),
        AuditStep {
            step_number: 4,
            rule_id: "total_pay".to_string(),
            rule_name: "Net Pay".to_string(),
            input: serde_json::json!({
                "base_salary": base_salary.to_string(),
                "overtime_pay": overtime_pay.to_string(),
                "bonus": bonus.to_string(),
                "epf": epf.to_string(),
                "socso": socso.to_string()
            }),
            output: serde_json::json!({ "total_pay": total_pay.to_string() }),
            reasoning: format!(
                "${} + ${} + ${} - ${} - ${} = ${}",
                base_salary, overtime_pay, bonus, epf, socso, total_pay
            ),
        },
    ];

    Ok(PayslipCalculation {
        fields: PayslipFields {
            base_salary,
            overtime_hours,
            overtime_pay,
            bonus,
            epf,
            socso,
            total_pay,
        },
        audit_steps,
    })
}

/// Validates the caller-supplied adjustments of a payslip request.
///
/// Runs before any store access so that malformed requests fail fast.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if `overtime_hours` is negative,
/// above `rates.max_overtime_hours` or has more than two fractional digits,
/// or if `bonus` is negative.
pub fn validate_adjustments(
    overtime_hours: Decimal,
    bonus: Money,
    rates: &PayrollRates,
) -> EngineResult<()> {
    if overtime_hours < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "overtime_hours",
            format!("must not be negative, got {}", overtime_hours),
        ));
    }
    if overtime_hours > rates.max_overtime_hours {
        return Err(EngineError::invalid_input(
            "overtime_hours",
            format!(
                "must not exceed {}, got {}",
                rates.max_overtime_hours, overtime_hours
            ),
        ));
    }
    if overtime_hours.normalize().scale() > OVERTIME_HOURS_SCALE {
        return Err(EngineError::invalid_input(
            "overtime_hours",
            format!(
                "must have at most {} fractional digits, got {}",
                OVERTIME_HOURS_SCALE, overtime_hours
            ),
        ));
    }
    if bonus.is_negative() {
        return Err(EngineError::invalid_input(
            "bonus",
            format!("must not be negative, got {}", bonus),
        ));
    }
    Ok(())
}

fn validate_inputs(
    employee: &EmployeeSnapshot,
    overtime_hours: Decimal,
    bonus: Money,
    rates: &PayrollRates,
) -> EngineResult<()> {
    validate_adjustments(overtime_hours, bonus, rates)?;
    if employee.base_salary.is_negative() {
        return Err(EngineError::invalid_input(
            "base_salary",
            format!(
                "employee '{}' has a negative base salary {}",
                employee.id, employee.base_salary
            ),
        ));
    }
    Ok(())
}

fn checked_product(amount: Decimal, factor: Decimal, field: &str) -> EngineResult<Decimal> {
    amount
        .checked_mul(factor)
        .ok_or_else(|| EngineError::invalid_input(field, "amount is too large"))
}

fn rate_step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    base_salary: Money,
    rate: Decimal,
    result: Money,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "rate": rate.normalize().to_string()
        }),
        output: serde_json::json!({ rule_id: result.to_string() }),
        reasoning: format!("${} x {} = ${}", base_salary, rate.normalize(), result),
    }
}
