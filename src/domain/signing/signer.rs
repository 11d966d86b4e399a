//! Signature computation and verification.

use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha1::{Digest, Sha1};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::algorithm::SignatureAlgorithm;
use super::signable::SignableFields;

type HmacSha256 = Hmac<Sha256>;

/// Name of the field carrying the signature in the outgoing form.
pub const SIGNATURE_FIELD: &str = "signature";

/// Computes the signature of a field set.
///
/// Only `vads_` fields are signed, so a `signature` field already present in
/// `fields` does not affect the result.
pub fn compute_signature<I, K, V>(fields: I, secret_key: &str, algorithm: SignatureAlgorithm) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    SignableFields::from_fields(fields).sign(secret_key, algorithm)
}

/// Checks a signature received from the provider.
///
/// Comparison is constant-time.
pub fn verify_signature<I, K, V>(
    fields: I,
    secret_key: &str,
    algorithm: SignatureAlgorithm,
    provided: &str,
) -> bool
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let expected = compute_signature(fields, secret_key, algorithm);
    let expected = expected.as_bytes();
    let provided = provided.as_bytes();

    if expected.len() != provided.len() {
        return false;
    }
    expected.ct_eq(provided).into()
}

impl SignableFields {
    /// Signs this subset with the given key and algorithm.
    pub fn sign(&self, secret_key: &str, algorithm: SignatureAlgorithm) -> String {
        let payload = self.signing_payload(secret_key);

        match algorithm {
            SignatureAlgorithm::Sha1 => hex::encode(Sha1::digest(payload.as_bytes())),
            SignatureAlgorithm::HmacSha256 => {
                let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
                    .expect("HMAC can take key of any size");
                mac.update(payload.as_bytes());
                base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes())
            }
        }
    }
}
