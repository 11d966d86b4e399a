//! Monetary amounts in minor units.

use std::fmt;

use super::currency::Currency;
use super::errors::PaymentFormError;

/// An amount expressed in the currency's smallest unit (cents for EUR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

impl Amount {
    pub fn from_minor_units(minor_units: u64) -> Self {
        Self(minor_units)
    }

    pub fn minor_units(&self) -> u64 {
        self.0
    }

    /// Parse a host decimal amount such as `"10.00"` into minor units.
    ///
    /// Trailing zeros beyond the currency's precision are accepted
    /// (`"10.500"` in EUR), other extra digits are not.
    pub fn parse_decimal(amount: &str, currency: &Currency) -> Result<Self, PaymentFormError> {
        let invalid = |reason: &'static str| PaymentFormError::InvalidAmount {
            amount: amount.to_string(),
            reason,
        };

        let trimmed = amount.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty"));
        }
        if trimmed.starts_with('-') {
            return Err(invalid("negative"));
        }

        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("not a decimal number"));
        }
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("not a decimal number"));
        }

        let exponent = usize::from(currency.exponent());
        let fraction = fraction.trim_end_matches('0');
        if fraction.len() > exponent {
            return Err(invalid("too many decimal places"));
        }

        let scale = 10u64.pow(u32::from(currency.exponent()));
        let whole: u64 = whole.parse().map_err(|_| invalid("too large"))?;
        let fraction: u64 = if fraction.is_empty() {
            0
        } else {
            let padded = format!("{:0<width$}", fraction, width = exponent);
            padded.parse().map_err(|_| invalid("too large"))?
        };

        whole
            .checked_mul(scale)
            .and_then(|v| v.checked_add(fraction))
            .map(Self)
            .ok_or_else(|| invalid("too large"))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
