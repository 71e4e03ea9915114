//! Calculation result models.
//!
//! This module contains the [`PayslipCalculation`] type returned by the payroll
//! calculator: the computed payslip fields plus an ordered audit trail
//! explaining each figure.

use serde::{Deserialize, Serialize};

use super::PayslipFields;

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The result of a payslip calculation.
///
/// The audit steps are informational and are not persisted with the payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipCalculation {
    /// The computed payslip fields.
    pub fields: PayslipFields,
    /// Audit steps in calculation order.
    pub audit_steps: Vec<AuditStep>,
}

impl PayslipCalculation {
    /// Looks up an audit step by rule id.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.audit_steps.iter().find(|s| s.rule_id == rule_id)
    }
}
