//! Payment domain error types

use thiserror::Error;

use crate::domain::signing::SignatureError;

/// Errors raised while assembling the outgoing payment form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentFormError {
    #[error("Required field missing: {0}")]
    MissingField(&'static str),

    #[error("Unknown currency: {0:?}")]
    UnknownCurrency(String),

    #[error("Invalid amount {amount:?}: {reason}")]
    InvalidAmount { amount: String, reason: &'static str },

    #[error("Invalid invoice id: {0:?}")]
    InvalidInvoiceId(String),

    #[error("Invalid account id: {0:?}")]
    InvalidAccountId(String),

    #[error("Unknown payment type: {0:?}")]
    UnknownPaymentType(String),

    #[error(transparent)]
    Signature(#[from] SignatureError),
}

/// Errors raised while verifying a provider notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("Notification signature missing")]
    MissingSignature,

    #[error("Invalid notification signature")]
    InvalidSignature,

    #[error("Notification field missing: {0}")]
    MissingField(&'static str),

    #[error("Notification is for site {0:?}")]
    SiteMismatch(String),

    #[error("Invalid notification field {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}
