//! ISO 4217 currencies accepted by the payment page.

use std::fmt;

use super::errors::PaymentFormError;

/// A currency the provider can settle in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Currency {
    alpha: &'static str,
    numeric: u16,
    exponent: u8,
}

const fn currency(alpha: &'static str, numeric: u16, exponent: u8) -> Currency {
    Currency {
        alpha,
        numeric,
        exponent,
    }
}

static CURRENCIES: &[Currency] = &[
    currency("AED", 784, 2),
    currency("AUD", 36, 2),
    currency("BRL", 986, 2),
    currency("CAD", 124, 2),
    currency("CHF", 756, 2),
    currency("CNY", 156, 2),
    currency("CZK", 203, 2),
    currency("DKK", 208, 2),
    currency("EUR", 978, 2),
    currency("GBP", 826, 2),
    currency("HKD", 344, 2),
    currency("HUF", 348, 2),
    currency("INR", 356, 2),
    currency("JPY", 392, 0),
    currency("KRW", 410, 0),
    currency("MAD", 504, 2),
    currency("MXN", 484, 2),
    currency("NOK", 578, 2),
    currency("NZD", 554, 2),
    currency("PLN", 985, 2),
    currency("SEK", 752, 2),
    currency("SGD", 702, 2),
    currency("TND", 788, 3),
    currency("TRY", 949, 2),
    currency("USD", 840, 2),
    currency("XOF", 952, 0),
    currency("XPF", 953, 0),
    currency("ZAR", 710, 2),
];

impl Currency {
    /// Look up a currency by alphabetic (`EUR`) or numeric (`978`) code.
    pub fn from_code(code: &str) -> Result<Self, PaymentFormError> {
        let code = code.trim();
        let found = if !code.is_empty() && code.chars().all(|c| c.is_ascii_digit()) {
            code.parse::<u16>()
                .ok()
                .and_then(|n| CURRENCIES.iter().find(|c| c.numeric == n))
        } else {
            CURRENCIES
                .iter()
                .find(|c| c.alpha.eq_ignore_ascii_case(code))
        };

        found
            .copied()
            .ok_or_else(|| PaymentFormError::UnknownCurrency(code.to_string()))
    }

    /// Alphabetic code, as used by the REST API.
    pub fn alpha_code(&self) -> &'static str {
        self.alpha
    }

    /// Three-digit numeric code, as used by `vads_currency`.
    pub fn numeric_code(&self) -> String {
        format!("{:03}", self.numeric)
    }

    /// Number of decimal places of the minor unit.
    pub fn exponent(&self) -> u8 {
        self.exponent
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_by_alpha_code() {
        let eur = Currency::from_code("EUR").unwrap();
        assert_eq!(eur.numeric_code(), "978");
        assert_eq!(eur.exponent(), 2);
    }

    #[test]
    fn alpha_lookup_ignores_case_and_whitespace() {
        assert_eq!(Currency::from_code(" usd ").unwrap().alpha_code(), "USD");
    }

    #[test]
    fn looks_up_by_numeric_code() {
        assert_eq!(Currency::from_code("978").unwrap().alpha_code(), "EUR");
        assert_eq!(Currency::from_code("036").unwrap().alpha_code(), "AUD");
    }

    #[test]
    fn numeric_code_is_zero_padded() {
        assert_eq!(Currency::from_code("AUD").unwrap().numeric_code(), "036");
    }

    #[test]
    fn unknown_codes_are_rejected() {
        for code in ["", "XXX", "999", "EURO"] {
            assert!(Currency::from_code(code).is_err(), "{code:?} should be rejected");
        }
    }

    #[test]
    fn table_has_no_duplicate_codes() {
        for (i, a) in CURRENCIES.iter().enumerate() {
            for b in &CURRENCIES[i + 1..] {
                assert_ne!(a.alpha, b.alpha);
                assert_ne!(a.numeric, b.numeric);
            }
        }
    }
}
