//! Property tests for parent-value combinations and CPD validation.

use std::collections::HashSet;

use proptest::prelude::*;

use cbn_core::models::combination;
use cbn_core::models::Cpd;

proptest! {
    #[test]
    fn enumeration_is_complete_and_canonical(width in 0_usize..8) {
        let rows: Vec<_> = combination::enumerate(width).collect();
        prop_assert_eq!(rows.len(), 1 << width);
        prop_assert!(rows.iter().all(|r| r.len() == width));
        let distinct: HashSet<_> = rows.iter().collect();
        prop_assert_eq!(distinct.len(), rows.len());
        prop_assert!(rows[0].iter().all(|&b| b));
        prop_assert!(rows[rows.len() - 1].iter().all(|&b| !b));
    }
}

proptest! {
    #[test]
    fn bitstring_keys_sort_like_enumeration(width in 1_usize..7) {
        // Descending bitstrings list the rows in enumeration order.
        let mut keys: Vec<String> = combination::enumerate(width)
            .map(|c| combination::encode(&c))
            .collect();
        let in_order = keys.clone();
        keys.sort_unstable_by(|a, b| b.cmp(a));
        prop_assert_eq!(keys, in_order);
    }
}

proptest! {
    #[test]
    fn validation_accepts_exactly_unit_interval(p in -2.0_f64..3.0) {
        let valid = Cpd::Prior(p).validate("n", 0).is_ok();
        prop_assert_eq!(valid, (0.0..=1.0).contains(&p));
    }
}

proptest! {
    #[test]
    fn non_bitstring_keys_are_rejected(key in "[01]{0,4}[a-z2-9][01]{0,4}") {
        prop_assert!(combination::decode(&key).is_err());
    }
}
