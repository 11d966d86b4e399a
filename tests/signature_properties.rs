//! Property tests for form signatures.

use proptest::prelude::*;

use payzen_gateway::domain::signing::{compute_signature, verify_signature, SignatureAlgorithm};

fn algorithm() -> impl Strategy<Value = SignatureAlgorithm> {
    prop_oneof![
        Just(SignatureAlgorithm::Sha1),
        Just(SignatureAlgorithm::HmacSha256),
    ]
}

/// Distinct `vads_` field names with arbitrary printable values.
fn vads_fields() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map("[a-z_]{1,12}", "[ -~]{0,20}", 0..12).prop_map(|map| {
        map.into_iter()
            .map(|(k, v)| (format!("vads_{}", k), v))
            .collect()
    })
}

proptest! {
    #[test]
    fn signature_is_deterministic(
        fields in vads_fields(),
        key in "[A-Za-z0-9]{1,16}",
        algo in algorithm(),
    ) {
        let first = compute_signature(fields.clone(), &key, algo);
        let second = compute_signature(fields, &key, algo);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn insertion_order_does_not_matter(
        fields in vads_fields(),
        key in "[A-Za-z0-9]{1,16}",
        algo in algorithm(),
    ) {
        let mut reversed = fields.clone();
        reversed.reverse();
        prop_assert_eq!(
            compute_signature(fields, &key, algo),
            compute_signature(reversed, &key, algo)
        );
    }

    #[test]
    fn unprefixed_fields_are_ignored(
        fields in vads_fields(),
        extra_value in "[ -~]{0,20}",
        key in "[A-Za-z0-9]{1,16}",
        algo in algorithm(),
    ) {
        let mut with_extra = fields.clone();
        with_extra.push(("return_url".to_string(), extra_value));
        with_extra.push(("signature".to_string(), "anything".to_string()));
        prop_assert_eq!(
            compute_signature(fields, &key, algo),
            compute_signature(with_extra, &key, algo)
        );
    }

    #[test]
    fn computed_signature_verifies(
        fields in vads_fields(),
        key in "[A-Za-z0-9]{1,16}",
        algo in algorithm(),
    ) {
        let signature = compute_signature(fields.clone(), &key, algo);
        prop_assert!(verify_signature(fields, &key, algo, &signature));
    }

    #[test]
    fn other_key_does_not_verify(
        fields in vads_fields(),
        key in "[A-Za-z0-9]{1,16}",
        algo in algorithm(),
    ) {
        let signature = compute_signature(fields.clone(), &key, algo);
        let other_key = format!("{}x", key);
        prop_assert!(!verify_signature(fields, &other_key, algo, &signature));
    }
}

#[test]
fn empty_subset_signs_the_key_alone() {
    let no_vads = vec![("return_url", "https://example.com")];
    assert_eq!(
        compute_signature(no_vads, "testkey", SignatureAlgorithm::Sha1),
        "913a73b565c8e2c8ed94497580f619397709b8b6"
    );
    assert_eq!(
        compute_signature(
            Vec::<(&str, &str)>::new(),
            "testkey",
            SignatureAlgorithm::HmacSha256
        ),
        "T89lyQIK3WFfeLNkvNbe9gpERw/1bo841IbP1eZZDTQ="
    );
}
