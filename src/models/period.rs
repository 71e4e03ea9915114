//! Monthly pay period.
//!
//! A [`PayPeriod`] is a calendar month represented by its first day. Any date
//! converted into a period is normalized, so `2024-03-17` and `2024-03-01`
//! identify the same period.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month, always stored as the first day of that month.
///
/// # Example
///
/// ```
/// use payslip_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::containing(NaiveDate::from_ymd_opt(2024, 3, 17).unwrap());
/// assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// assert_eq!(period.label(), "March 2024");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "NaiveDate", into = "NaiveDate")]
pub struct PayPeriod(NaiveDate);

impl PayPeriod {
    /// Returns the period containing the given date.
    pub fn containing(date: NaiveDate) -> Self {
        PayPeriod(date - Days::new(u64::from(date.day0())))
    }

    /// Returns the period for a year and month, or `None` if the month is invalid.
    pub fn from_year_month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(PayPeriod)
    }

    /// The first day of the period.
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// The calendar year of the period.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The calendar month of the period (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Month and year for display, e.g. `March 2024`.
    pub fn label(&self) -> String {
        self.0.format("%B %Y").to_string()
    }

    /// Compact stamp for file names, e.g. `2024_03`.
    pub fn file_stamp(&self) -> String {
        self.0.format("%Y_%m").to_string()
    }
}

impl From<NaiveDate> for PayPeriod {
    fn from(date: NaiveDate) -> Self {
        PayPeriod::containing(date)
    }
}

impl From<PayPeriod> for NaiveDate {
    fn from(period: PayPeriod) -> Self {
        period.0
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_containing_normalizes_to_first_day() {
        assert_eq!(PayPeriod::containing(date(2024, 3, 17)).first_day(), date(2024, 3, 1));
        assert_eq!(PayPeriod::containing(date(2024, 2, 29)).first_day(), date(2024, 2, 1));
        assert_eq!(PayPeriod::containing(date(2024, 12, 31)).first_day(), date(2024, 12, 1));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = PayPeriod::containing(date(2024, 3, 17));
        let twice = PayPeriod::containing(once.first_day());
        assert_eq!(once, twice);
        assert_eq!(once, PayPeriod::containing(date(2024, 3, 1)));
    }

    #[test]
    fn test_from_year_month() {
        assert_eq!(
            PayPeriod::from_year_month(2025, 7).unwrap().first_day(),
            date(2025, 7, 1)
        );
        assert!(PayPeriod::from_year_month(2025, 13).is_none());
    }

    #[test]
    fn test_label_and_file_stamp() {
        let period = PayPeriod::containing(date(2025, 1, 9));
        assert_eq!(period.label(), "January 2025");
        assert_eq!(period.file_stamp(), "2025_01");
        assert_eq!(period.to_string(), "2025-01");
        assert_eq!(period.year(), 2025);
        assert_eq!(period.month(), 1);
    }

    #[test]
    fn test_deserialize_normalizes_any_day() {
        let period: PayPeriod = serde_json::from_str("\"2024-03-17\"").unwrap();
        assert_eq!(period.first_day(), date(2024, 3, 1));
    }

    #[test]
    fn test_serializes_as_first_day() {
        let period = PayPeriod::containing(date(2024, 3, 17));
        assert_eq!(serde_json::to_string(&period).unwrap(), "\"2024-03-01\"");
    }
}
