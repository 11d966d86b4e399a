//! Domain layer containing the gateway's business rules and types.
//!
//! # Module Organization
//!
//! - `signing` - Field selection, ordering and hashing for form signatures
//! - `payment` - Typed payment contexts, the signed form and notifications
//! - `gateway` - Host-facing metadata, settings schema and result statuses

pub mod gateway;
pub mod payment;
pub mod signing;
