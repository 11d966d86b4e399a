//! PayZen REST API adapter.
//!
//! # Configuration
//!
//! ```ignore
//! let config = PayzenConfig::new().with_base_url("https://api.payzen.eu");
//! let adapter = PayzenPaymentAdapter::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;

use crate::config::ProviderConfig;
use crate::domain::payment::MerchantConfig;
use crate::ports::{
    CancelSubscriptionRequest, PaymentError, PaymentErrorCode, PaymentProvider, ProviderResponse,
    RefundRequest,
};

use super::api_types::{
    CancelOrRefundBody, EnvelopeStatus, ErrorAnswer, PayzenEnvelope, SubscriptionCancelBody,
    TransactionAnswer,
};

/// Default REST API host.
const DEFAULT_API_BASE_URL: &str = "https://api.payzen.eu";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const REFUND_PATH: &str = "Transaction/CancelOrRefund";
const CANCEL_SUBSCRIPTION_PATH: &str = "Subscription/Cancel";

/// PayZen API configuration.
#[derive(Debug, Clone)]
pub struct PayzenConfig {
    /// Base URL for the REST API (default: https://api.payzen.eu).
    api_base_url: String,

    /// Timeout applied to every request.
    request_timeout: Duration,
}

impl PayzenConfig {
    /// Create a configuration pointing at the production API host.
    pub fn new() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/api-payment/V4/{}",
            self.api_base_url.trim_end_matches('/'),
            path
        )
    }
}

impl Default for PayzenConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&ProviderConfig> for PayzenConfig {
    fn from(config: &ProviderConfig) -> Self {
        Self::new()
            .with_base_url(config.api_base_url.clone())
            .with_timeout(Duration::from_secs(config.request_timeout_secs))
    }
}

/// PayZen payment provider adapter.
///
/// Implements `PaymentProvider` over the REST API.
pub struct PayzenPaymentAdapter {
    config: PayzenConfig,
    http_client: reqwest::Client,
}

impl PayzenPaymentAdapter {
    /// Create a new adapter with the given configuration.
    pub fn new(config: PayzenConfig) -> Result<Self, PaymentError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PaymentError::configuration(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// POST a body to an API path and decode the envelope.
    async fn call<B: Serialize + ?Sized>(
        &self,
        path: &str,
        merchant: &MerchantConfig,
        body: &B,
    ) -> Result<PayzenEnvelope, PaymentError> {
        let password = merchant.rest_password.as_ref().ok_or_else(|| {
            PaymentError::configuration("REST API password is not configured")
        })?;

        let url = self.config.endpoint(path);
        tracing::debug!(url = %url, site_id = %merchant.account_id, "Calling PayZen API");

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&merchant.account_id, Some(password.expose_secret()))
            .json(body)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            tracing::warn!(path, status = %status, "PayZen rejected API credentials");
            return Err(PaymentError::authentication(format!(
                "PayZen API rejected credentials ({})",
                status
            )));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PaymentError::new(
                PaymentErrorCode::RateLimitExceeded,
                "PayZen API rate limit exceeded",
            ));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(path, status = %status, error = %error_text, "PayZen API call failed");
            let raw: serde_json::Value = serde_json::from_str(&error_text)
                .unwrap_or(serde_json::Value::String(error_text.clone()));
            return Err(PaymentError::provider(format!(
                "PayZen API error ({}): {}",
                status, error_text
            ))
            .with_raw(raw));
        }

        response.json::<PayzenEnvelope>().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse PayZen response: {}", e))
        })
    }

    /// Map an `ERROR` envelope to a rejection or an error.
    fn interpret_error(envelope: PayzenEnvelope) -> Result<ProviderResponse, PaymentError> {
        let answer: ErrorAnswer = match serde_json::from_value(envelope.answer.clone()) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!(error = %e, "PayZen returned a malformed error answer");
                return Err(PaymentError::provider(format!(
                    "Malformed PayZen error answer: {}",
                    e
                ))
                .with_raw(envelope.answer));
            }
        };

        if answer.is_refusal() {
            tracing::info!(
                error_code = answer.error_code.as_deref().unwrap_or_default(),
                "PayZen refused operation"
            );
            return Ok(ProviderResponse::rejected(
                answer.error_code.clone(),
                envelope.answer,
            ));
        }

        tracing::error!(
            error_code = answer.error_code.as_deref().unwrap_or_default(),
            error = %answer.message(),
            "PayZen returned an error"
        );
        let error = PaymentError::provider(answer.message()).with_raw(envelope.answer);
        Err(match answer.error_code {
            Some(code) => error.with_provider_code(code),
            None => error,
        })
    }
}

#[async_trait]
impl PaymentProvider for PayzenPaymentAdapter {
    async fn refund(&self, request: RefundRequest) -> Result<ProviderResponse, PaymentError> {
        let body = CancelOrRefundBody {
            uuid: &request.transaction_id,
            amount: request.amount.minor_units(),
            currency: request.currency.alpha_code(),
            resolution_mode: "AUTO",
        };

        let envelope = self.call(REFUND_PATH, &request.merchant, &body).await?;

        match envelope.status {
            EnvelopeStatus::Error => Self::interpret_error(envelope),
            EnvelopeStatus::Success => {
                let answer: TransactionAnswer = serde_json::from_value(envelope.answer.clone())
                    .map_err(|e| {
                        PaymentError::provider(format!("Invalid transaction answer: {}", e))
                            .with_raw(envelope.answer.clone())
                    })?;

                if answer.is_refused() {
                    tracing::info!(
                        transaction_id = %request.transaction_id,
                        detailed_status = answer.detailed_status.as_deref().unwrap_or_default(),
                        "PayZen refused refund"
                    );
                    return Ok(ProviderResponse::rejected(
                        answer.detailed_status,
                        envelope.answer,
                    ));
                }

                tracing::info!(
                    transaction_id = %request.transaction_id,
                    amount = request.amount.minor_units(),
                    "Refund accepted by PayZen"
                );
                Ok(ProviderResponse::accepted(answer.uuid, envelope.answer))
            }
        }
    }

    async fn cancel_subscription(
        &self,
        request: CancelSubscriptionRequest,
    ) -> Result<ProviderResponse, PaymentError> {
        let body = SubscriptionCancelBody {
            payment_method_token: &request.payment_method_token,
            subscription_id: &request.subscription_id,
        };

        let envelope = self
            .call(CANCEL_SUBSCRIPTION_PATH, &request.merchant, &body)
            .await?;

        match envelope.status {
            EnvelopeStatus::Error => Self::interpret_error(envelope),
            EnvelopeStatus::Success => {
                tracing::info!(
                    subscription_id = %request.subscription_id,
                    "Subscription cancelled by PayZen"
                );
                Ok(ProviderResponse::accepted(
                    Some(request.subscription_id),
                    envelope.answer,
                ))
            }
        }
    }
}
