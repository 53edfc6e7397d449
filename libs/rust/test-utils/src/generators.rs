//! Shared proptest generators for service test suites.
//!
//! This module provides reusable generators for the inputs the issuer
//! handles: caller subjects, key expiry offsets and raw integer encodings.

use proptest::prelude::*;

/// Generate caller-asserted subject strings (usernames, emails, opaque ids).
pub fn subject_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_]{2,31}",
        "[a-z0-9._%+-]{1,20}@[a-z0-9-]{1,20}\\.[a-z]{2,4}",
        "[a-zA-Z0-9]{32}",
    ]
}

/// Generate subjects that carry no identity (empty or whitespace only).
pub fn blank_subject_strategy() -> impl Strategy<Value = String> {
    "[ \t]{0,8}"
}

/// Generate a key expiry offset in seconds relative to "now".
///
/// Zero is included so the expiry-equals-now boundary (expired) is hit.
pub fn expiry_offset_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![
        Just(0i64),
        Just(-10i64),
        Just(3600i64),
        -7200i64..7200,
    ]
}

/// Generate a batch of expiry offsets for populating a store.
pub fn expiry_offsets_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(expiry_offset_strategy(), 1..16)
}

/// Generate arbitrary big-endian byte strings, leading zeros included.
pub fn big_endian_bytes_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..8),
        prop::collection::vec(any::<u8>(), 250..260),
        (0usize..4, prop::collection::vec(any::<u8>(), 1..64)).prop_map(|(zeros, tail)| {
            let mut bytes = vec![0u8; zeros];
            bytes.extend(tail);
            bytes
        }),
    ]
}

/// Fixed point in time used where tests need a reproducible "now".
pub const FIXED_NOW: i64 = 1_700_000_000;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    #[test]
    fn test_subject_never_blank() {
        let mut runner = TestRunner::default();
        for _ in 0..20 {
            let value = subject_strategy().new_tree(&mut runner).unwrap().current();
            assert!(!value.trim().is_empty());
        }
    }

    #[test]
    fn test_blank_subject_is_blank() {
        let mut runner = TestRunner::default();
        for _ in 0..20 {
            let value = blank_subject_strategy()
                .new_tree(&mut runner)
                .unwrap()
                .current();
            assert!(value.trim().is_empty());
        }
    }

    #[test]
    fn test_expiry_offsets_non_empty() {
        let mut runner = TestRunner::default();
        for _ in 0..10 {
            let value = expiry_offsets_strategy()
                .new_tree(&mut runner)
                .unwrap()
                .current();
            assert!(!value.is_empty());
            assert!(value.len() < 16);
        }
    }
}
