//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Each handler corresponds to one host gateway entry point.

pub mod handlers;

pub use handlers::{
    BuildPaymentLinkCommand, BuildPaymentLinkHandler, BuildPaymentLinkResult,
    CancelSubscriptionCommand, CancelSubscriptionHandler,
    HandlePaymentNotificationCommand, HandlePaymentNotificationHandler, NotificationHandlingError,
    RefundTransactionCommand, RefundTransactionHandler,
};
