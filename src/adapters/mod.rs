//! Adapters - Implementations of port interfaces and external boundaries.
//!
//! Adapters connect the domain to external systems:
//! - `payzen` - PayZen REST API (`PaymentProvider`) and its test double
//! - `host` - Billing host parameter bag

pub mod host;
pub mod payzen;

pub use host::{HostParameters, HostParamsError};
pub use payzen::{MockPaymentProvider, PayzenConfig, PayzenPaymentAdapter};
