//! Property tests for sanctions matching

use compliance_service::SanctionsList;
use proptest::prelude::*;

proptest! {
    /// Property: any ASCII case variant of a listed identifier matches
    #[test]
    fn prop_case_variants_match(identifier in "[a-zA-Z0-9]{1,32}", flips in proptest::collection::vec(any::<bool>(), 32)) {
        let list = SanctionsList::from_identifiers([identifier.clone()]).unwrap();
        let variant: String = identifier
            .chars()
            .zip(flips.iter())
            .map(|(c, flip)| if *flip { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect();

        prop_assert!(list.is_sanctioned(&variant));
    }

    /// Property: a strict prefix or extension of a listed identifier never matches
    #[test]
    fn prop_no_partial_match(identifier in "[a-z]{2,32}", suffix in "[a-z0-9]{1,8}") {
        let list = SanctionsList::from_identifiers([identifier.clone()]).unwrap();

        prop_assert!(!list.is_sanctioned(&identifier[..identifier.len() - 1]));
        let extended = format!("{}{}", identifier, suffix);
        prop_assert!(!list.is_sanctioned(&extended));
    }
}
