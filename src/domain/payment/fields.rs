//! Ordered set of outgoing form fields.

use crate::domain::signing::{SignableFields, SignatureAlgorithm};

/// Form fields in emission order, names unique.
///
/// Order only matters for rendering. Signing sorts independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentFieldSet {
    fields: Vec<(String, String)>,
}

impl PaymentFieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing the value in place if the name already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The `vads_` subset covered by the signature.
    pub fn signable(&self) -> SignableFields {
        SignableFields::from_fields(self.iter())
    }

    pub fn sign(&self, secret_key: &str, algorithm: SignatureAlgorithm) -> String {
        self.signable().sign(secret_key, algorithm)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PaymentFieldSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_first_position_on_replace() {
        let mut fields = PaymentFieldSet::new();
        fields.insert("b", "1");
        fields.insert("a", "2");
        fields.insert("b", "3");

        let collected: Vec<_> = fields.iter().collect();
        assert_eq!(collected, vec![("b", "3"), ("a", "2")]);
    }

    #[test]
    fn remove_returns_value() {
        let mut fields: PaymentFieldSet = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(fields.remove("a"), Some("1".to_string()));
        assert_eq!(fields.remove("a"), None);
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn signable_subset_excludes_other_fields() {
        let fields: PaymentFieldSet = [("return_url", "x"), ("vads_amount", "1")]
            .into_iter()
            .collect();
        assert_eq!(fields.signable().len(), 1);
    }
}
