//! Form signing for the PayZen hosted payment page.
//!
//! The provider authenticates every form it receives by recomputing a
//! signature over the `vads_`-prefixed fields:
//!
//! 1. Keep only fields whose name starts with `vads_`
//! 2. Sort them by name (byte-wise)
//! 3. Join the values, each followed by `+`
//! 4. Append the merchant secret key
//! 5. Hash with SHA-1 (hex) or HMAC-SHA-256 keyed by the secret (base64)
//!
//! Values are used verbatim. A `+` inside a value is not escaped; the
//! provider computes the signature the same way.

mod algorithm;
mod errors;
mod signable;
mod signer;

pub use algorithm::SignatureAlgorithm;
pub use errors::SignatureError;
pub use signable::{SignableFields, SIGNABLE_PREFIX};
pub use signer::{compute_signature, verify_signature, SIGNATURE_FIELD};
