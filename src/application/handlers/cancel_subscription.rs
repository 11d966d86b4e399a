//! CancelSubscriptionHandler - Cancels a recurring payment.

use std::sync::Arc;

use crate::adapters::host::{HostParameters, HostParamsError};
use crate::domain::gateway::GatewayResponse;
use crate::ports::{CancelSubscriptionRequest, PaymentProvider};

use super::provider_outcome::to_gateway_response;

/// Command to cancel a subscription.
#[derive(Debug, Clone)]
pub struct CancelSubscriptionCommand {
    pub params: HostParameters,
}

/// Handler for subscription cancellation.
pub struct CancelSubscriptionHandler {
    provider: Arc<dyn PaymentProvider>,
}

impl CancelSubscriptionHandler {
    pub fn new(provider: Arc<dyn PaymentProvider>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, cmd: CancelSubscriptionCommand) -> GatewayResponse {
        let request = match Self::build_request(&cmd.params) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "Cancellation rejected before provider call");
                return GatewayResponse::error(e.to_string());
            }
        };

        let subscription_id = request.subscription_id.clone();
        let result = self.provider.cancel_subscription(request).await;
        if let Err(e) = &result {
            tracing::error!(subscription_id = %subscription_id, error = %e, "Cancellation failed");
        }

        to_gateway_response(result)
    }

    fn build_request(
        params: &HostParameters,
    ) -> Result<CancelSubscriptionRequest, HostParamsError> {
        let (token, subscription_id) = params.subscription_reference()?;
        Ok(CancelSubscriptionRequest {
            merchant: params.merchant_config()?,
            payment_method_token: token.to_string(),
            subscription_id: subscription_id.to_string(),
        })
    }
}
