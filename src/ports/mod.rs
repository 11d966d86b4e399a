//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Payment Ports
//!
//! - `PaymentProvider` - Provider management API (refunds, cancellations)

mod payment_provider;

pub use payment_provider::{
    CancelSubscriptionRequest, PaymentError, PaymentErrorCode, PaymentProvider, ProviderOutcome,
    ProviderResponse, RefundRequest,
};
