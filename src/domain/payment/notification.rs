//! Provider server-to-server payment notifications.
//!
//! The provider posts the final transaction state to the callback URL with
//! the same field naming and signature scheme as the outgoing form.

use serde::Serialize;

use super::amount::Amount;
use super::currency::Currency;
use super::errors::NotificationError;
use super::fields::PaymentFieldSet;
use super::merchant::{ContextMode, MerchantConfig};
use crate::domain::signing::{verify_signature, SIGNATURE_FIELD};

/// What the notification means for the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationOutcome {
    /// Funds are authorised or captured; the invoice can be marked paid.
    Paid,

    /// Still waiting on the provider or a manual check.
    Pending,

    /// Refused, abandoned, cancelled or expired.
    Failed,
}

impl NotificationOutcome {
    /// Classify a `vads_trans_status` value.
    pub fn from_trans_status(status: &str) -> Self {
        match status {
            "AUTHORISED" | "CAPTURED" | "AUTHORISED_TO_VALIDATE" | "ACCEPTED" => {
                NotificationOutcome::Paid
            }
            "WAITING_AUTHORISATION"
            | "WAITING_AUTHORISATION_TO_VALIDATE"
            | "UNDER_VERIFICATION"
            | "INITIAL" => NotificationOutcome::Pending,
            _ => NotificationOutcome::Failed,
        }
    }
}

/// A verified payment notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentNotification {
    /// Host invoice number (`vads_order_id`).
    pub invoice_id: String,

    /// Provider transaction reference (`vads_trans_uuid`).
    pub transaction_id: String,

    /// Raw `vads_trans_status`.
    pub trans_status: String,

    pub outcome: NotificationOutcome,

    /// Amount in minor units.
    pub amount: u64,

    /// Alphabetic currency code.
    pub currency: String,

    pub context_mode: ContextMode,
}

impl PaymentNotification {
    /// Verify the signature and extract the payment outcome.
    pub fn verify(
        fields: &PaymentFieldSet,
        merchant: &MerchantConfig,
    ) -> Result<Self, NotificationError> {
        let provided = fields
            .get(SIGNATURE_FIELD)
            .ok_or(NotificationError::MissingSignature)?;

        if !verify_signature(
            fields.iter(),
            merchant.signing_key(),
            merchant.signature_algorithm,
            provided,
        ) {
            tracing::warn!(
                order_id = fields.get("vads_order_id").unwrap_or_default(),
                "Rejected payment notification with invalid signature"
            );
            return Err(NotificationError::InvalidSignature);
        }

        let site_id = required(fields, "vads_site_id")?;
        if site_id != merchant.account_id {
            return Err(NotificationError::SiteMismatch(site_id.to_string()));
        }

        let trans_status = required(fields, "vads_trans_status")?;
        let amount = required(fields, "vads_amount")?
            .parse::<u64>()
            .map(Amount::from_minor_units)
            .map_err(|e| NotificationError::InvalidField {
                field: "vads_amount",
                reason: e.to_string(),
            })?;
        let currency = Currency::from_code(required(fields, "vads_currency")?).map_err(|e| {
            NotificationError::InvalidField {
                field: "vads_currency",
                reason: e.to_string(),
            }
        })?;
        let context_mode = match fields.get("vads_ctx_mode") {
            Some("PRODUCTION") => ContextMode::Production,
            _ => ContextMode::Test,
        };

        Ok(Self {
            invoice_id: required(fields, "vads_order_id")?.to_string(),
            transaction_id: fields
                .get("vads_trans_uuid")
                .or_else(|| fields.get("vads_trans_id"))
                .unwrap_or_default()
                .to_string(),
            trans_status: trans_status.to_string(),
            outcome: NotificationOutcome::from_trans_status(trans_status),
            amount: amount.minor_units(),
            currency: currency.alpha_code().to_string(),
            context_mode,
        })
    }
}

fn required<'a>(
    fields: &'a PaymentFieldSet,
    name: &'static str,
) -> Result<&'a str, NotificationError> {
    fields
        .get(name)
        .filter(|v| !v.is_empty())
        .ok_or(NotificationError::MissingField(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signing::{compute_signature, SignatureAlgorithm};

    fn merchant() -> MerchantConfig {
        MerchantConfig::new("12345678", "testkey")
            .with_signature_algorithm(SignatureAlgorithm::HmacSha256)
    }

    fn signed(mut fields: PaymentFieldSet, merchant: &MerchantConfig) -> PaymentFieldSet {
        let signature = compute_signature(
            fields.iter(),
            merchant.signing_key(),
            merchant.signature_algorithm,
        );
        fields.insert(SIGNATURE_FIELD, signature);
        fields
    }

    fn notification_fields(status: &str) -> PaymentFieldSet {
        [
            ("vads_site_id", "12345678"),
            ("vads_ctx_mode", "TEST"),
            ("vads_order_id", "42"),
            ("vads_trans_id", "000042"),
            ("vads_trans_uuid", "a3f1c0de9b8e4d2c8f7a6b5c4d3e2f10"),
            ("vads_trans_status", status),
            ("vads_amount", "1000"),
            ("vads_currency", "978"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn verifies_paid_notification() {
        let merchant = merchant();
        let fields = signed(notification_fields("AUTHORISED"), &merchant);

        let notification = PaymentNotification::verify(&fields, &merchant).unwrap();
        assert_eq!(notification.invoice_id, "42");
        assert_eq!(notification.transaction_id, "a3f1c0de9b8e4d2c8f7a6b5c4d3e2f10");
        assert_eq!(notification.outcome, NotificationOutcome::Paid);
        assert_eq!(notification.amount, 1000);
        assert_eq!(notification.currency, "EUR");
        assert_eq!(notification.context_mode, ContextMode::Test);
    }

    #[test]
    fn classifies_statuses() {
        assert_eq!(
            NotificationOutcome::from_trans_status("CAPTURED"),
            NotificationOutcome::Paid
        );
        assert_eq!(
            NotificationOutcome::from_trans_status("UNDER_VERIFICATION"),
            NotificationOutcome::Pending
        );
        assert_eq!(
            NotificationOutcome::from_trans_status("REFUSED"),
            NotificationOutcome::Failed
        );
        assert_eq!(
            NotificationOutcome::from_trans_status("SOMETHING_NEW"),
            NotificationOutcome::Failed
        );
    }

    #[test]
    fn rejects_missing_signature() {
        let result = PaymentNotification::verify(&notification_fields("AUTHORISED"), &merchant());
        assert_eq!(result, Err(NotificationError::MissingSignature));
    }

    #[test]
    fn rejects_tampered_amount() {
        let merchant = merchant();
        let mut fields = signed(notification_fields("AUTHORISED"), &merchant);
        fields.insert("vads_amount", "1");

        let result = PaymentNotification::verify(&fields, &merchant);
        assert_eq!(result, Err(NotificationError::InvalidSignature));
    }

    #[test]
    fn unsigned_extra_fields_do_not_matter() {
        let merchant = merchant();
        let mut fields = signed(notification_fields("REFUSED"), &merchant);
        fields.insert("hash", "whatever");

        let notification = PaymentNotification::verify(&fields, &merchant).unwrap();
        assert_eq!(notification.outcome, NotificationOutcome::Failed);
    }

    #[test]
    fn rejects_other_site() {
        let merchant = merchant();
        let mut unsigned = notification_fields("AUTHORISED");
        unsigned.insert("vads_site_id", "87654321");
        let fields = signed(unsigned, &merchant);

        let result = PaymentNotification::verify(&fields, &merchant);
        assert_eq!(
            result,
            Err(NotificationError::SiteMismatch("87654321".to_string()))
        );
    }

    #[test]
    fn rejects_missing_order_id() {
        let merchant = merchant();
        let mut unsigned = notification_fields("AUTHORISED");
        unsigned.remove("vads_order_id");
        let fields = signed(unsigned, &merchant);

        let result = PaymentNotification::verify(&fields, &merchant);
        assert_eq!(result, Err(NotificationError::MissingField("vads_order_id")));
    }
}
