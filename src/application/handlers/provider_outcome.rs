//! Mapping of provider results onto the host status convention.

use crate::domain::gateway::{GatewayResponse, GatewayStatus};
use crate::ports::{PaymentError, ProviderOutcome, ProviderResponse};

/// `Accepted` -> success, `Rejected` -> declined, `PaymentError` -> error.
///
/// An error carries the provider's raw answer when there is one, otherwise
/// its message.
pub(super) fn to_gateway_response(
    result: Result<ProviderResponse, PaymentError>,
) -> GatewayResponse {
    match result {
        Ok(response) => {
            let gateway_response = match response.outcome {
                ProviderOutcome::Accepted => GatewayResponse::success(response.raw),
                ProviderOutcome::Rejected => GatewayResponse::declined(response.raw),
            };
            match response.reference {
                Some(reference) => gateway_response.with_transid(reference),
                None => gateway_response,
            }
        }
        Err(error) => match error.raw {
            Some(raw) => GatewayResponse::new(GatewayStatus::Error, raw),
            None => GatewayResponse::error(error.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepted_maps_to_success_with_transid() {
        let response = to_gateway_response(Ok(ProviderResponse::accepted(
            Some("r1".into()),
            json!({"uuid": "r1"}),
        )));
        assert_eq!(response.status, GatewayStatus::Success);
        assert_eq!(response.transid.as_deref(), Some("r1"));
        assert_eq!(response.rawdata, json!({"uuid": "r1"}));
    }

    #[test]
    fn rejected_maps_to_declined() {
        let response = to_gateway_response(Ok(ProviderResponse::rejected(
            Some("PSP_100".into()),
            json!({"errorCode": "PSP_100"}),
        )));
        assert_eq!(response.status, GatewayStatus::Declined);
        assert_eq!(response.rawdata["errorCode"], "PSP_100");
    }

    #[test]
    fn payment_error_maps_to_error() {
        let response = to_gateway_response(Err(PaymentError::network("connection reset")));
        assert_eq!(response.status, GatewayStatus::Error);
        assert_eq!(response.rawdata, json!("network_error: connection reset"));
    }

    #[test]
    fn payment_error_with_raw_answer_keeps_it() {
        let error = PaymentError::provider("Invalid transaction uuid")
            .with_provider_code("INT_905")
            .with_raw(json!({"errorCode": "INT_905", "detailedErrorCode": "D1"}));

        let response = to_gateway_response(Err(error));
        assert_eq!(response.status, GatewayStatus::Error);
        assert_eq!(response.rawdata["errorCode"], "INT_905");
        assert_eq!(response.rawdata["detailedErrorCode"], "D1");
    }
}
