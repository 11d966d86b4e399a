//! HandlePaymentNotificationHandler - Verifies the provider's callback.

use thiserror::Error;

use crate::adapters::host::{HostParameters, HostParamsError};
use crate::domain::payment::{NotificationError, PaymentNotification};

/// Command carrying the gateway settings and the posted callback fields.
#[derive(Debug, Clone)]
pub struct HandlePaymentNotificationCommand {
    pub params: HostParameters,
}

/// Why a notification was not accepted.
#[derive(Debug, Error)]
pub enum NotificationHandlingError {
    #[error(transparent)]
    Params(#[from] HostParamsError),

    #[error(transparent)]
    Notification(#[from] NotificationError),
}

/// Handler for payment notifications.
///
/// Only signature-verified notifications are returned; the host marks the
/// invoice from the result.
#[derive(Debug, Default)]
pub struct HandlePaymentNotificationHandler;

impl HandlePaymentNotificationHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        cmd: HandlePaymentNotificationCommand,
    ) -> Result<PaymentNotification, NotificationHandlingError> {
        let merchant = cmd.params.merchant_config()?;
        let fields = cmd.params.notification_fields();

        let notification = PaymentNotification::verify(&fields, &merchant)?;

        tracing::info!(
            invoice_id = %notification.invoice_id,
            transaction_id = %notification.transaction_id,
            trans_status = %notification.trans_status,
            "Payment notification verified"
        );

        Ok(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::NotificationOutcome;
    use crate::domain::signing::{compute_signature, SignatureAlgorithm};
    use serde_json::json;

    fn posted_fields(secret: &str) -> serde_json::Value {
        let fields = [
            ("vads_site_id", "12345678"),
            ("vads_order_id", "42"),
            ("vads_trans_uuid", "a3f1c0de9b8e4d2c8f7a6b5c4d3e2f10"),
            ("vads_trans_status", "CAPTURED"),
            ("vads_amount", "1000"),
            ("vads_currency", "978"),
        ];
        let signature = compute_signature(fields, secret, SignatureAlgorithm::Sha1);

        let mut map = serde_json::Map::new();
        for (k, v) in fields {
            map.insert(k.to_string(), json!(v));
        }
        map.insert("signature".to_string(), json!(signature));
        serde_json::Value::Object(map)
    }

    fn command(posted: serde_json::Value) -> HandlePaymentNotificationCommand {
        HandlePaymentNotificationCommand {
            params: serde_json::from_value(json!({
                "accountID": "12345678",
                "secretKey": "testkey",
                "signatureAlgo": "SHA-1",
                "postfields": posted
            }))
            .unwrap(),
        }
    }

    #[test]
    fn accepts_signed_notification() {
        let notification = HandlePaymentNotificationHandler::new()
            .handle(command(posted_fields("testkey")))
            .unwrap();
        assert_eq!(notification.invoice_id, "42");
        assert_eq!(notification.outcome, NotificationOutcome::Paid);
    }

    #[test]
    fn rejects_notification_signed_with_other_key() {
        let result = HandlePaymentNotificationHandler::new().handle(command(posted_fields("otherkey")));
        assert!(matches!(
            result,
            Err(NotificationHandlingError::Notification(
                NotificationError::InvalidSignature
            ))
        ));
    }

    #[test]
    fn rejects_unusable_settings() {
        let mut cmd = command(posted_fields("testkey"));
        cmd.params.signature_algo = "MD5".to_string();
        let result = HandlePaymentNotificationHandler::new().handle(cmd);
        assert!(matches!(result, Err(NotificationHandlingError::Params(_))));
    }
}
