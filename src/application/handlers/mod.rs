//! Application handlers.
//!
//! ## Commands
//! - Building the signed payment link shown on an invoice
//! - Refunding a transaction
//! - Cancelling a subscription
//! - Processing the provider's payment notification

mod build_payment_link;
mod cancel_subscription;
mod handle_payment_notification;
mod provider_outcome;
mod refund_transaction;

pub use build_payment_link::{
    BuildPaymentLinkCommand, BuildPaymentLinkHandler, BuildPaymentLinkResult,
};
pub use cancel_subscription::{CancelSubscriptionCommand, CancelSubscriptionHandler};
pub use handle_payment_notification::{
    HandlePaymentNotificationCommand, HandlePaymentNotificationHandler, NotificationHandlingError,
};
pub use refund_transaction::{RefundTransactionCommand, RefundTransactionHandler};
