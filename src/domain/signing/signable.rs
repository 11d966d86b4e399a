//! The signable subset of an outgoing field set.

use std::collections::BTreeMap;

/// Name prefix that marks a field as covered by the signature.
pub const SIGNABLE_PREFIX: &str = "vads_";

/// Delimiter written after every signed value.
const DELIMITER: char = '+';

/// Fields that take part in the signature, ordered by name.
///
/// `String` ordering is byte-wise, which is what the provider uses when it
/// recomputes the signature. Insertion order of the source fields is
/// irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignableFields {
    fields: BTreeMap<String, String>,
}

impl SignableFields {
    /// Collects the `vads_` fields out of any name/value sequence.
    ///
    /// Later duplicates replace earlier ones.
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let fields = fields
            .into_iter()
            .filter(|(name, _)| name.as_ref().starts_with(SIGNABLE_PREFIX))
            .map(|(name, value)| (name.as_ref().to_string(), value.as_ref().to_string()))
            .collect();

        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in signing order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Builds `value1+value2+...+valueN+secret`.
    ///
    /// With no signable fields the payload is the secret alone.
    pub fn signing_payload(&self, secret_key: &str) -> String {
        let capacity = self.fields.values().map(|v| v.len() + 1).sum::<usize>() + secret_key.len();
        let mut payload = String::with_capacity(capacity);
        for value in self.fields.values() {
            payload.push_str(value);
            payload.push(DELIMITER);
        }
        payload.push_str(secret_key);
        payload
    }
}
