//! Host parameter error types

use thiserror::Error;

use crate::domain::payment::PaymentFormError;
use crate::domain::signing::SignatureError;

/// Errors converting the host parameter bag into domain types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostParamsError {
    #[error("Host parameter missing: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid host parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Payment(#[from] PaymentFormError),
}
