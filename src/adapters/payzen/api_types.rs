//! PayZen REST API V4 request and response bodies.

use serde::{Deserialize, Serialize};

/// Prefix of error codes the provider uses for payment-side refusals.
const REFUSAL_CODE_PREFIX: &str = "PSP_";

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `Transaction/CancelOrRefund`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrRefundBody<'a> {
    /// Transaction reference.
    pub uuid: &'a str,

    /// Amount in minor units.
    pub amount: u64,

    /// Alphabetic currency code.
    pub currency: &'a str,

    /// Let the provider pick cancel (unsettled) or refund (settled).
    pub resolution_mode: &'static str,
}

/// Body of `Subscription/Cancel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionCancelBody<'a> {
    pub payment_method_token: &'a str,
    pub subscription_id: &'a str,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// Status of the response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// Envelope wrapping every API answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayzenEnvelope {
    pub status: EnvelopeStatus,

    /// Operation-specific payload, or an `ErrorAnswer`.
    #[serde(default)]
    pub answer: serde_json::Value,

    #[serde(default)]
    pub ticket: Option<String>,

    #[serde(default)]
    pub server_date: Option<String>,

    #[serde(default)]
    pub mode: Option<String>,
}

/// Answer of a failed call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorAnswer {
    #[serde(default)]
    pub error_code: Option<String>,

    #[serde(default)]
    pub error_message: Option<String>,

    #[serde(default)]
    pub detailed_error_code: Option<String>,

    #[serde(default)]
    pub detailed_error_message: Option<String>,
}

impl ErrorAnswer {
    /// Whether the provider refused the operation, as opposed to failing
    /// to process the request.
    pub fn is_refusal(&self) -> bool {
        self.error_code
            .as_deref()
            .is_some_and(|code| code.starts_with(REFUSAL_CODE_PREFIX))
    }

    /// Best available description.
    pub fn message(&self) -> String {
        self.detailed_error_message
            .clone()
            .or_else(|| self.error_message.clone())
            .unwrap_or_else(|| "Unknown PayZen error".to_string())
    }
}

/// Transaction answer of `Transaction/CancelOrRefund`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionAnswer {
    #[serde(default)]
    pub uuid: Option<String>,

    /// `PAID`, `UNPAID`, `RUNNING` or `PARTIALLY_PAID`.
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub detailed_status: Option<String>,

    #[serde(default)]
    pub amount: Option<u64>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub operation_type: Option<String>,
}

impl TransactionAnswer {
    /// Whether the provider refused the refund operation.
    pub fn is_refused(&self) -> bool {
        self.status.as_deref() == Some("UNPAID")
            || matches!(self.detailed_status.as_deref(), Some("REFUSED" | "ERROR"))
    }
}
