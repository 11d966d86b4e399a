//! Signature error types

use thiserror::Error;

/// Errors raised while selecting a signing scheme.
///
/// Computing a signature itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("Unknown signature algorithm: {0:?}")]
    UnknownAlgorithm(String),
}
