//! Employee snapshot and employment classification.
//!
//! Employees are owned by an external store. The engine only sees a
//! point-in-time [`EmployeeSnapshot`] with the fields it needs.

use serde::{Deserialize, Serialize};

use super::Money;

/// Represents the employment classification used for overtime rate selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    /// Full-time employment.
    FullTime,
    /// Part-time employment.
    PartTime,
}

/// An employee as supplied by the employee store at generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSnapshot {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Name of the employee's department.
    pub department: String,
    /// Name of the employee's position.
    pub position: String,
    /// Current monthly base salary.
    pub base_salary: Money,
    /// The employment classification.
    pub employment_type: EmploymentType,
}

impl EmployeeSnapshot {
    /// Returns true if the employee is part-time.
    ///
    /// # Examples
    ///
    /// ```
    /// use payslip_engine::models::{EmployeeSnapshot, EmploymentType, Money};
    ///
    /// let employee = EmployeeSnapshot {
    ///     id: "E001".to_string(),
    ///     name: "Aisyah Rahman".to_string(),
    ///     department: "Finance".to_string(),
    ///     position: "Accountant".to_string(),
    ///     base_salary: Money::from_cents(450_000),
    ///     employment_type: EmploymentType::PartTime,
    /// };
    /// assert!(employee.is_part_time());
    /// ```
    pub fn is_part_time(&self) -> bool {
        self.employment_type == EmploymentType::PartTime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_employee() {
        let json = r#"{
            "id": "E001",
            "name": "Aisyah Rahman",
            "department": "Finance",
            "position": "Accountant",
            "base_salary": "4500.00",
            "employment_type": "full_time"
        }"#;

        let employee: EmployeeSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "E001");
        assert_eq!(employee.base_salary, Money::from_cents(450_000));
        assert_eq!(employee.employment_type, EmploymentType::FullTime);
        assert!(!employee.is_part_time());
    }

    #[test]
    fn test_employment_type_serialization() {
        assert_eq!(
            serde_json::to_string(&EmploymentType::FullTime).unwrap(),
            "\"full_time\""
        );
        assert_eq!(
            serde_json::to_string(&EmploymentType::PartTime).unwrap(),
            "\"part_time\""
        );
    }

    #[test]
    fn test_unknown_employment_type_rejected() {
        let result: Result<EmploymentType, _> = serde_json::from_str("\"casual\"");
        assert!(result.is_err());
    }
}
