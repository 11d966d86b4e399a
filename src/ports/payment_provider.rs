//! Payment provider port for the management API.
//!
//! The hosted payment page handles the payment itself. Follow-up operations
//! (refunds, subscription cancellation) go through the provider's
//! server-to-server API, behind this trait.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::payment::{Amount, Currency, MerchantConfig};

/// Port for provider management operations.
///
/// A business refusal by the provider is a successful call with
/// `ProviderOutcome::Rejected`; `PaymentError` is reserved for calls that
/// could not be completed.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Refund or cancel a previous transaction.
    async fn refund(&self, request: RefundRequest) -> Result<ProviderResponse, PaymentError>;

    /// Cancel a recurring payment.
    async fn cancel_subscription(
        &self,
        request: CancelSubscriptionRequest,
    ) -> Result<ProviderResponse, PaymentError>;
}

/// Request to refund a transaction.
#[derive(Debug, Clone)]
pub struct RefundRequest {
    pub merchant: MerchantConfig,

    /// Provider transaction reference.
    pub transaction_id: String,

    pub amount: Amount,

    pub currency: Currency,
}

/// Request to cancel a subscription.
#[derive(Debug, Clone)]
pub struct CancelSubscriptionRequest {
    pub merchant: MerchantConfig,

    /// Token of the payment method the subscription is attached to.
    pub payment_method_token: String,

    pub subscription_id: String,
}

/// Whether the provider carried out the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderOutcome {
    Accepted,
    Rejected,
}

/// Provider answer to a management call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub outcome: ProviderOutcome,

    /// Provider reference of the resulting operation, if any.
    pub reference: Option<String>,

    /// Provider's error code when rejected.
    pub provider_code: Option<String>,

    /// Full provider answer, for the host's gateway log.
    pub raw: serde_json::Value,
}

impl ProviderResponse {
    pub fn accepted(reference: Option<String>, raw: serde_json::Value) -> Self {
        Self {
            outcome: ProviderOutcome::Accepted,
            reference,
            provider_code: None,
            raw,
        }
    }

    pub fn rejected(provider_code: Option<String>, raw: serde_json::Value) -> Self {
        Self {
            outcome: ProviderOutcome::Rejected,
            reference: None,
            provider_code,
            raw,
        }
    }
}

/// A provider call that could not be completed.
///
/// Displays as `<code>: <message>`, which is what the host records for an
/// `error` status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{code}: {message}")]
pub struct PaymentError {
    pub code: PaymentErrorCode,

    pub message: String,

    /// PayZen `errorCode`, when the API returned one.
    pub provider_code: Option<String>,

    /// What the API answered, if anything: the `ERROR` answer object, or
    /// the body of a non-2xx response.
    pub raw: Option<serde_json::Value>,
}

impl PaymentError {
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            raw: None,
        }
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = Some(raw);
        self
    }

    /// Transport failure or timeout.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Site id / REST password refused.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::AuthenticationError, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ConfigurationError, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }

    /// Whether the host may retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.code,
            PaymentErrorCode::NetworkError | PaymentErrorCode::RateLimitExceeded
        )
    }
}

/// Category of a `PaymentError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    NetworkError,
    AuthenticationError,

    /// Merchant settings missing or unusable.
    ConfigurationError,

    /// HTTP 429 from the API.
    RateLimitExceeded,

    /// Unexpected HTTP status, undecodable body, or a non-refusal `ERROR`
    /// answer.
    ProviderError,
}

impl PaymentErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::ConfigurationError => "configuration_error",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::ProviderError => "provider_error",
        }
    }
}

impl fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
