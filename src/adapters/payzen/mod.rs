//! PayZen payment provider adapter.
//!
//! Implements the `PaymentProvider` port over the PayZen REST API (V4):
//! - Refunds via `Transaction/CancelOrRefund`
//! - Subscription cancellation via `Subscription/Cancel`
//!
//! # Security
//!
//! - Calls authenticate with HTTP basic auth (`site id : REST password`)
//! - The REST password is held in a `secrecy::SecretString` and never logged
//!
//! # Configuration
//!
//! The API base URL and request timeout come from `ProviderConfig`; merchant
//! credentials travel with each request.

mod api_types;
mod mock_payment_provider;
mod payzen_adapter;

pub use api_types::{
    CancelOrRefundBody, EnvelopeStatus, ErrorAnswer, PayzenEnvelope, SubscriptionCancelBody,
    TransactionAnswer,
};
pub use mock_payment_provider::{MockPaymentProvider, Operation, ProviderCall};
pub use payzen_adapter::{PayzenConfig, PayzenPaymentAdapter};
