//! RefundTransactionHandler - Refunds a transaction through the provider.

use std::sync::Arc;

use crate::adapters::host::{HostParameters, HostParamsError};
use crate::domain::gateway::GatewayResponse;
use crate::ports::{PaymentProvider, RefundRequest};

use super::provider_outcome::to_gateway_response;

/// Command to refund a transaction.
#[derive(Debug, Clone)]
pub struct RefundTransactionCommand {
    pub params: HostParameters,
}

/// Handler for refunds.
///
/// Always answers in the host convention: invalid parameters and failed
/// calls are reported as `error`, provider refusals as `declined`.
pub struct RefundTransactionHandler {
    provider: Arc<dyn PaymentProvider>,
}

impl RefundTransactionHandler {
    pub fn new(provider: Arc<dyn PaymentProvider>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, cmd: RefundTransactionCommand) -> GatewayResponse {
        let request = match Self::build_request(&cmd.params) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "Refund request rejected before provider call");
                return GatewayResponse::error(e.to_string());
            }
        };

        let transaction_id = request.transaction_id.clone();
        let result = self.provider.refund(request).await;
        if let Err(e) = &result {
            tracing::error!(transaction_id = %transaction_id, error = %e, "Refund failed");
        }

        to_gateway_response(result)
    }

    fn build_request(params: &HostParameters) -> Result<RefundRequest, HostParamsError> {
        Ok(RefundRequest {
            merchant: params.merchant_config()?,
            transaction_id: params.refund_transaction_id()?.to_string(),
            amount: params.amount()?,
            currency: params.currency()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::payzen::{MockPaymentProvider, Operation, ProviderCall};
    use crate::domain::gateway::GatewayStatus;
    use crate::ports::{PaymentError, ProviderResponse};
    use serde_json::json;

    fn command() -> RefundTransactionCommand {
        RefundTransactionCommand {
            params: serde_json::from_value(json!({
                "accountID": "12345678",
                "secretKey": "testkey",
                "restPassword": "testpassword_abc",
                "signatureAlgo": "SHA-1",
                "transid": "a3f1c0de9b8e4d2c8f7a6b5c4d3e2f10",
                "amount": "12.50",
                "currency": "EUR"
            }))
            .unwrap(),
        }
    }

    fn handler(mock: &MockPaymentProvider) -> RefundTransactionHandler {
        RefundTransactionHandler::new(Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn successful_refund() {
        let mock = MockPaymentProvider::new();
        let response = handler(&mock).handle(command()).await;

        assert_eq!(response.status, GatewayStatus::Success);
        assert_eq!(
            response.transid.as_deref(),
            Some("refund_a3f1c0de9b8e4d2c8f7a6b5c4d3e2f10")
        );
        assert_eq!(
            mock.calls(),
            vec![ProviderCall::Refund {
                transaction_id: "a3f1c0de9b8e4d2c8f7a6b5c4d3e2f10".to_string(),
                amount: 1250,
                currency: "EUR".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn provider_refusal_is_declined() {
        let mock = MockPaymentProvider::new();
        mock.push_response(ProviderResponse::rejected(
            Some("PSP_100".into()),
            json!({"errorCode": "PSP_100"}),
        ));

        let response = handler(&mock).handle(command()).await;
        assert_eq!(response.status, GatewayStatus::Declined);
        assert_eq!(response.rawdata["errorCode"], "PSP_100");
    }

    #[tokio::test]
    async fn provider_failure_is_error_with_message() {
        let mock = MockPaymentProvider::new();
        mock.push_error(PaymentError::network("connection reset"));

        let response = handler(&mock).handle(command()).await;
        assert_eq!(response.status, GatewayStatus::Error);
        assert!(response.rawdata.as_str().unwrap().contains("connection reset"));
    }

    #[tokio::test]
    async fn missing_transaction_is_error_without_call() {
        let mock = MockPaymentProvider::new();
        let mut cmd = command();
        cmd.params.transaction_id.clear();

        let response = handler(&mock).handle(cmd).await;
        assert_eq!(response.status, GatewayStatus::Error);
        assert_eq!(mock.call_count(Operation::Refund), 0);
    }

    #[tokio::test]
    async fn invalid_amount_is_error_without_call() {
        let mock = MockPaymentProvider::new();
        let mut cmd = command();
        cmd.params.amount = "12.505".to_string();

        let response = handler(&mock).handle(cmd).await;
        assert_eq!(response.status, GatewayStatus::Error);
        assert_eq!(mock.call_count(Operation::Refund), 0);
    }
}
