use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MoneyError {
    #[error("amount must not be negative: {0}")]
    Negative(Decimal),
    #[error("amount is not a finite number")]
    NotFinite,
    #[error("invalid amount '{0}'")]
    Parse(String),
}

/// A non-negative monetary amount. Serialized as a plain JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money(Decimal);

impl Money {
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Money(amount))
    }

    pub fn from_cents(cents: u32) -> Self {
        Money(Decimal::from(cents) / Decimal::from(100))
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn amount(self) -> Decimal {
        self.0
    }

    pub fn to_f64(self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    /// Parses a plain decimal string such as `3.99` (no currency symbol).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dec = Decimal::from_str(s.trim()).map_err(|_| MoneyError::Parse(s.to_string()))?;
        Money::new(dec)
    }
}

impl TryFrom<f64> for Money {
    type Error = MoneyError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(MoneyError::NotFinite);
        }
        let dec = Decimal::try_from(value).map_err(|_| MoneyError::Parse(value.to_string()))?;
        Money::new(dec)
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> Self {
        money.to_f64()
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}
