//! Configuration types for payslip generation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{EmploymentType, Money};

/// Organization identity printed in the payslip header.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrganizationProfile {
    /// The organization name (e.g., "STAFFSYNC").
    pub name: String,
    /// Company registration number.
    pub registration_no: String,
    /// Postal address.
    pub address: String,
    /// Contact telephone number.
    pub telephone: String,
    /// Contact email address.
    pub email: String,
    /// Placeholder text shown where a logo would be rendered.
    #[serde(default = "default_logo_placeholder")]
    pub logo_placeholder: String,
    /// Note printed at the bottom of every payslip.
    #[serde(default = "default_footer_note")]
    pub footer_note: String,
}

fn default_logo_placeholder() -> String {
    "[COMPANY LOGO]".to_string()
}

fn default_footer_note() -> String {
    "This is a computer-generated payslip and does not require a signature.".to_string()
}

impl Default for OrganizationProfile {
    fn default() -> Self {
        Self {
            name: "STAFFSYNC".to_string(),
            registration_no: "123456-A".to_string(),
            address: "123 TARUMT Street, Kuantan".to_string(),
            telephone: "+60146233677".to_string(),
            email: "support@staffsync.com".to_string(),
            logo_placeholder: default_logo_placeholder(),
            footer_note: default_footer_note(),
        }
    }
}

/// Currency labels used when formatting amounts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurrencyConfig {
    /// Short code printed before amounts (e.g., "RM").
    pub code: String,
    /// Full currency name appended to amounts in words.
    pub name: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            code: "RM".to_string(),
            name: "Ringgit Malaysia".to_string(),
        }
    }
}

/// Organization configuration file structure (organization.yaml).
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationConfig {
    /// Header identity.
    pub organization: OrganizationProfile,
    /// Currency labels.
    #[serde(default)]
    pub currency: CurrencyConfig,
}

/// Flat overtime rates per hour by employment type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OvertimeRates {
    /// Overtime rate for full-time employees.
    pub full_time: Money,
    /// Overtime rate for part-time employees.
    pub part_time: Money,
}

impl OvertimeRates {
    /// Returns the hourly overtime rate for an employment type.
    pub fn for_employment_type(&self, employment_type: EmploymentType) -> Money {
        match employment_type {
            EmploymentType::FullTime => self.full_time,
            EmploymentType::PartTime => self.part_time,
        }
    }
}

/// Payroll rate table (payroll.yaml).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayrollRates {
    /// Flat overtime rates.
    pub overtime: OvertimeRates,
    /// EPF deduction as a fraction of base salary.
    pub epf_rate: Decimal,
    /// SOCSO deduction as a fraction of base salary.
    pub socso_rate: Decimal,
    /// Upper bound on overtime hours accepted per payslip.
    pub max_overtime_hours: Decimal,
}

impl Default for PayrollRates {
    fn default() -> Self {
        Self {
            overtime: OvertimeRates {
                full_time: Money::from_cents(2000),
                part_time: Money::from_cents(1500),
            },
            epf_rate: Decimal::new(11, 2),
            socso_rate: Decimal::new(5, 3),
            max_overtime_hours: Decimal::from(200),
        }
    }
}

/// The complete engine configuration.
///
/// This struct aggregates everything loaded from a configuration directory.
/// [`EngineConfig::default`] carries the built-in values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Header identity.
    pub organization: OrganizationProfile,
    /// Currency labels.
    pub currency: CurrencyConfig,
    /// Rate table.
    pub rates: PayrollRates,
}
