//! Host platform boundary.
//!
//! The billing host hands every gateway call a flat parameter bag. This
//! adapter deserializes that bag once and converts it into the typed domain
//! contexts; nothing past this module reads host keys.

mod errors;
mod params;

pub use errors::HostParamsError;
pub use params::{ClientDetails, HostParameters};
