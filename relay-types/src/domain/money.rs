//! Minor-unit amounts and processor currency codes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Currency used when a caller does not name one.
pub const DEFAULT_CURRENCY: &str = "eur";

/// ISO 4217 currency code, stored lowercase as the processor expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses a three-letter code, case-insensitively.
    pub fn new(code: &str) -> Result<Self, DomainError> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidCurrency(code.to_string()));
        }
        Ok(Self(code.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self(DEFAULT_CURRENCY.to_string())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Strictly positive amount in the smallest unit of a currency (cents for EUR).
///
/// Amounts arrive from callers already expressed in minor units and are
/// forwarded to the processor without any scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct MinorUnits(i64);

impl MinorUnits {
    /// Creates a new amount, rejecting zero and negative values.
    pub fn new(amount: i64) -> Result<Self, DomainError> {
        if amount <= 0 {
            return Err(DomainError::InvalidAmount(
                "le montant doit être strictement positif".into(),
            ));
        }
        Ok(Self(amount))
    }

    /// Validates an amount taken straight from a JSON body.
    ///
    /// Integral floats such as `1999.0` are accepted; anything with a
    /// fractional part is not, since callers already send minor units.
    pub fn from_json(number: &serde_json::Number) -> Result<Self, DomainError> {
        if let Some(amount) = number.as_i64() {
            return Self::new(amount);
        }
        if number.is_u64() {
            return Err(DomainError::InvalidAmount("montant hors limites".into()));
        }

        let value = number.as_f64().unwrap_or(f64::NAN);
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(DomainError::InvalidAmount(
                "le montant doit être un entier en centimes".into(),
            ));
        }
        if value <= 0.0 {
            return Self::new(0);
        }
        if value >= i64::MAX as f64 {
            return Err(DomainError::InvalidAmount("montant hors limites".into()));
        }
        Self::new(value as i64)
    }

    /// Returns the raw amount in minor units.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for MinorUnits {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MinorUnits> for i64 {
    fn from(value: MinorUnits) -> Self {
        value.0
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
