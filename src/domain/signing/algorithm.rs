//! Signature algorithm selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::SignatureError;

/// Hash scheme applied to the signing payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureAlgorithm {
    /// Lowercase hex SHA-1 digest of the payload.
    #[serde(rename = "SHA-1")]
    Sha1,

    /// Base64 HMAC-SHA-256 of the payload, keyed by the secret key.
    #[serde(rename = "HMAC-SHA-256")]
    HmacSha256,
}

impl SignatureAlgorithm {
    /// Canonical provider name of the algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureAlgorithm::Sha1 => "SHA-1",
            SignatureAlgorithm::HmacSha256 => "HMAC-SHA-256",
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = SignatureError;

    /// Parses the names used by the provider and by the host's settings
    /// dropdown. Matching is exact; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SHA-1" | "SHA1" => Ok(SignatureAlgorithm::Sha1),
            "HMAC-SHA-256" | "HMAC_SHA_256" => Ok(SignatureAlgorithm::HmacSha256),
            other => Err(SignatureError::UnknownAlgorithm(other.to_string())),
        }
    }
}
