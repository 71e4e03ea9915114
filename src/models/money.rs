//! Fixed-point money type.
//!
//! [`Money`] wraps a [`Decimal`] that always carries exactly two fractional
//! digits. Values enter the type either through [`Money::round`], which applies
//! round-half-away-from-zero once, or through a checked conversion that refuses
//! to drop significant digits.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of fractional digits carried by every [`Money`] value.
pub const MONEY_SCALE: u32 = 2;

/// A monetary amount with exactly two fractional digits.
///
/// Serializes as a decimal string (`"1234.50"`). Deserialization rejects
/// inputs with more than two significant fractional digits instead of
/// rounding them.
///
/// # Example
///
/// ```
/// use payslip_engine::models::Money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let epf = Money::round(Decimal::from_str("3000.00").unwrap() * Decimal::from_str("0.11").unwrap()).unwrap();
/// assert_eq!(epf.to_string(), "330.00");
/// assert_eq!(Money::round(Decimal::from_str("0.005").unwrap()).unwrap().to_string(), "0.01");
/// assert!(Money::round(Decimal::MAX).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Returns a zero amount (`0.00`).
    pub fn zero() -> Self {
        Money(Decimal::new(0, MONEY_SCALE))
    }

    /// Creates an amount from a whole number of cents.
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, MONEY_SCALE))
    }

    /// Rounds an arbitrary-precision value half away from zero to two places.
    ///
    /// This is the single rounding point for computed figures. Fails when the
    /// value is too large to carry two fractional digits.
    pub fn round(value: Decimal) -> EngineResult<Self> {
        let rounded =
            value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        Self::at_money_scale(rounded)
    }

    /// Adds two amounts, returning `None` if the sum cannot be held at scale 2.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0
            .checked_add(rhs.0)
            .filter(|sum| sum.scale() == MONEY_SCALE)
            .map(Money)
    }

    /// Subtracts two amounts, returning `None` if the difference cannot be held
    /// at scale 2.
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0
            .checked_sub(rhs.0)
            .filter(|difference| difference.scale() == MONEY_SCALE)
            .map(Money)
    }

    // rescale silently keeps a smaller scale when the mantissa has no room
    fn at_money_scale(value: Decimal) -> EngineResult<Self> {
        let mut exact = value;
        exact.rescale(MONEY_SCALE);
        if exact.scale() != MONEY_SCALE {
            return Err(EngineError::invalid_input(
                "amount",
                format!("{} is too large to carry {} fractional digits", value, MONEY_SCALE),
            ));
        }
        Ok(Money(exact))
    }

    /// Returns the underlying decimal value (scale 2).
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies by a rate without rounding.
    ///
    /// Returns `None` if the product overflows the decimal range.
    pub fn checked_mul(&self, rate: Decimal) -> Option<Decimal> {
        self.0.checked_mul(rate)
    }

    /// The whole-unit part of the absolute amount.
    pub fn whole_units(&self) -> u128 {
        // Every Decimal magnitude fits in u128.
        self.0.abs().trunc().to_u128().unwrap_or_default()
    }

    /// The cents part of the absolute amount (0..=99).
    pub fn cents(&self) -> u32 {
        (self.0.abs().fract() * Decimal::ONE_HUNDRED)
            .to_u32()
            .unwrap_or_default()
    }

    /// Formats the amount with thousands separators, e.g. `1,234.56`.
    pub fn format_grouped(&self) -> String {
        let plain = self.0.abs().to_string();
        let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.is_negative() { "-" } else { "" };
        format!("{sign}{grouped}.{fraction}")
    }
}

impl TryFrom<Decimal> for Money {
    type Error = EngineError;

    fn try_from(value: Decimal) -> EngineResult<Self> {
        if value.normalize().scale() > MONEY_SCALE {
            return Err(EngineError::invalid_input(
                "amount",
                format!("{} has more than {} fractional digits", value, MONEY_SCALE),
            ));
        }
        Money::at_money_scale(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl FromStr for Money {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let value = Decimal::from_str(s.trim())
            .map_err(|e| EngineError::invalid_input("amount", format!("'{}': {}", s, e)))?;
        Money::try_from(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}
