//! Payslip document composition.
//!
//! Builds a [`DocumentModel`] from an employee, a stored payslip and the
//! organization configuration. The composer only formats stored values; it
//! never rounds or recalculates a payslip figure.

use crate::calculation::amount_to_words;
use crate::config::{CurrencyConfig, OrganizationProfile};
use crate::models::{EmployeeSnapshot, Money, Payslip};

use super::model::{
    DocumentModel, FieldBlock, FieldRow, HeaderBlock, LabeledValue, LedgerEntry, LedgerRow,
    LedgerTable, NetPayBlock, RowEmphasis, Section,
};

/// Banner text printed under the header.
pub const PAYSLIP_BANNER: &str = "SALARY SLIP";

/// Heading of the employee information block.
pub const EMPLOYEE_INFORMATION_HEADING: &str = "EMPLOYEE INFORMATION";

/// Formats an amount with the currency code, e.g. `RM 1,234.56`.
pub fn format_currency(amount: Money, currency: &CurrencyConfig) -> String {
    format!("{} {}", currency.code, amount.format_grouped())
}

/// Composes the document for a payslip.
///
/// `employee` supplies the identity fields (name, department, position);
/// every amount comes from `payslip`.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Utc};
/// use payslip_engine::config::EngineConfig;
/// use payslip_engine::document::compose_payslip_document;
/// use payslip_engine::models::{EmployeeSnapshot, EmploymentType, Money, PayPeriod, Payslip};
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
/// let payslip = Payslip {
///     id: 1,
///     employee_id: "E001".to_string(),
///     period: PayPeriod::containing(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
///     base_salary: Money::from_cents(300_000),
///     overtime_hours: Decimal::ZERO,
///     overtime_pay: Money::zero(),
///     bonus: Money::zero(),
///     epf: Money::from_cents(33_000),
///     socso: Money::from_cents(1_500),
///     total_pay: Money::from_cents(265_500),
///     generated_at: Utc::now(),
/// };
///
/// let config = EngineConfig::default();
/// let document = compose_payslip_document(&employee, &payslip, &config.organization, &config.currency);
/// assert_eq!(document.net_pay().unwrap().amount, "RM 2,655.00");
/// ```
pub fn compose_payslip_document(
    employee: &EmployeeSnapshot,
    payslip: &Payslip,
    organization: &OrganizationProfile,
    currency: &CurrencyConfig,
) -> DocumentModel {
    let sections = vec![
        Section::Header(header_block(organization)),
        Section::Banner {
            text: PAYSLIP_BANNER.to_string(),
        },
        Section::Fields(employee_block(employee, payslip)),
        Section::Ledger(ledger_table(payslip, currency)),
        Section::NetPay(net_pay_block(payslip, currency)),
        Section::Note {
            text: organization.footer_note.clone(),
        },
    ];

    DocumentModel {
        title: format!("Payslip - {} - {}", employee.name, payslip.period.label()),
        sections,
    }
}

/// Suggested download name, e.g. `Payslip_Aisyah_Rahman_2024_03.pdf`.
///
/// Anything other than ASCII letters, digits, `-` and `_` in the name becomes
/// `_`, so the result is safe inside a quoted `Content-Disposition` value.
pub fn suggested_file_name(employee_name: &str, payslip: &Payslip, extension: &str) -> String {
    let safe_name: String = employee_name
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "Payslip_{}_{}.{}",
        safe_name,
        payslip.period.file_stamp(),
        extension
    )
}

fn header_block(organization: &OrganizationProfile) -> HeaderBlock {
    HeaderBlock {
        logo_placeholder: organization.logo_placeholder.clone(),
        organization_name: organization.name.clone(),
        registration: format!("Registration No: {}", organization.registration_no),
        address: organization.address.clone(),
        contact: format!(
            "Tel: {} | Email: {}",
            organization.telephone, organization.email
        ),
    }
}

fn employee_block(employee: &EmployeeSnapshot, payslip: &Payslip) -> FieldBlock {
    FieldBlock {
        heading: EMPLOYEE_INFORMATION_HEADING.to_string(),
        rows: vec![
            FieldRow {
                cells: vec![
                    LabeledValue::new("Employee ID", payslip.employee_id.as_str()),
                    LabeledValue::new("Employee Name", employee.name.as_str()),
                ],
            },
            FieldRow {
                cells: vec![
                    LabeledValue::new("Department", employee.department.as_str()),
                    LabeledValue::new("Position", employee.position.as_str()),
                ],
            },
            FieldRow {
                cells: vec![LabeledValue::new("Period", payslip.period.label())],
            },
        ],
    }
}

fn ledger_table(payslip: &Payslip, currency: &CurrencyConfig) -> LedgerTable {
    let entry = |label: &str, amount: Money| {
        Some(LedgerEntry::new(label, format_currency(amount, currency)))
    };
    let row = |left, right, emphasis| LedgerRow {
        left,
        right,
        emphasis,
    };

    LedgerTable {
        left_heading: "EARNINGS".to_string(),
        right_heading: "DEDUCTIONS".to_string(),
        rows: vec![
            row(
                entry("Basic Salary", payslip.base_salary),
                entry("EPF", payslip.epf),
                RowEmphasis::Normal,
            ),
            row(
                entry("Overtime Pay", payslip.overtime_pay),
                entry("SOCSO", payslip.socso),
                RowEmphasis::Normal,
            ),
            row(entry("Bonus", payslip.bonus), None, RowEmphasis::Normal),
            row(
                entry("Total Earnings", payslip.total_earnings()),
                entry("Total Deductions", payslip.total_deductions()),
                RowEmphasis::Total,
            ),
        ],
    }
}

fn net_pay_block(payslip: &Payslip, currency: &CurrencyConfig) -> NetPayBlock {
    NetPayBlock {
        label: "NET PAY".to_string(),
        amount: format_currency(payslip.total_pay, currency),
        words_label: "In Words".to_string(),
        words: format!("{} {}", amount_to_words(payslip.total_pay), currency.name),
    }
}
