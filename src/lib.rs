//! PayZen Gateway - Hosted payment page module for billing platforms
//!
//! This crate signs PayZen payment forms for host invoices, verifies the
//! provider's payment notifications, and drives refunds and subscription
//! cancellations through the PayZen REST API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
