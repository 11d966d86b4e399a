//! Merchant account settings.

use std::fmt;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::errors::PaymentFormError;
use crate::domain::signing::SignatureAlgorithm;

/// Provider context the form is submitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContextMode {
    #[default]
    Test,
    Production,
}

impl ContextMode {
    /// Maps the host's test-mode checkbox.
    pub fn from_test_flag(test_mode: bool) -> Self {
        if test_mode {
            ContextMode::Test
        } else {
            ContextMode::Production
        }
    }

    /// Value of `vads_ctx_mode`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextMode::Test => "TEST",
            ContextMode::Production => "PRODUCTION",
        }
    }
}

impl fmt::Display for ContextMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment schedule requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentType {
    /// Paid in one instalment.
    #[default]
    Single,

    /// Paid in several instalments.
    Multi,
}

impl PaymentType {
    /// Value of `vads_payment_config`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Single => "SINGLE",
            PaymentType::Multi => "MULTI",
        }
    }
}

impl FromStr for PaymentType {
    type Err = PaymentFormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SINGLE" => Ok(PaymentType::Single),
            "MULTI" => Ok(PaymentType::Multi),
            other => Err(PaymentFormError::UnknownPaymentType(other.to_string())),
        }
    }
}

/// Merchant account settings, as configured in the host's gateway settings.
#[derive(Debug, Clone)]
pub struct MerchantConfig {
    /// Shop identifier (`vads_site_id`).
    pub account_id: String,

    /// Signing key for the selected context. Never transmitted.
    pub secret_key: SecretString,

    /// Password for the REST management API (refunds, cancellations).
    pub rest_password: Option<SecretString>,

    pub context_mode: ContextMode,

    pub signature_algorithm: SignatureAlgorithm,

    pub payment_type: PaymentType,
}

impl MerchantConfig {
    /// Create a merchant configuration in test mode, signing with SHA-1.
    pub fn new(account_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            secret_key: SecretString::new(secret_key.into()),
            rest_password: None,
            context_mode: ContextMode::Test,
            signature_algorithm: SignatureAlgorithm::Sha1,
            payment_type: PaymentType::Single,
        }
    }

    pub fn with_rest_password(mut self, password: impl Into<String>) -> Self {
        self.rest_password = Some(SecretString::new(password.into()));
        self
    }

    pub fn with_context_mode(mut self, mode: ContextMode) -> Self {
        self.context_mode = mode;
        self
    }

    pub fn with_signature_algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.signature_algorithm = algorithm;
        self
    }

    pub fn with_payment_type(mut self, payment_type: PaymentType) -> Self {
        self.payment_type = payment_type;
        self
    }

    /// Borrow the signing key.
    pub fn signing_key(&self) -> &str {
        self.secret_key.expose_secret()
    }

    /// Validate the settings needed to sign a form.
    pub fn validate(&self) -> Result<(), PaymentFormError> {
        if self.account_id.is_empty() {
            return Err(PaymentFormError::MissingField("accountID"));
        }
        if !self.account_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(PaymentFormError::InvalidAccountId(self.account_id.clone()));
        }
        if self.secret_key.expose_secret().is_empty() {
            return Err(PaymentFormError::MissingField("secretKey"));
        }
        Ok(())
    }
}
