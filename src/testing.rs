use itertools::Itertools;
use proptest::{
    collection::{hash_set, vec},
    prelude::*,
    sample::SizeRange,
};

/// Short keys over a small alphabet, so that generated entries often share a key.
pub fn key() -> impl Strategy<Value = String> {
    "[a-e]{0,3}"
}

pub fn value() -> impl Strategy<Value = Vec<u8>> {
    vec(any::<u8>(), 0..8)
}

pub fn entries(size: impl Into<SizeRange>) -> impl Strategy<Value = Vec<(String, Vec<u8>)>> {
    vec((key(), value()), size)
}

/// Generates a sorted collection of distinct keys
pub fn sorted_keys(size: impl Into<SizeRange>) -> impl Strategy<Value = Vec<String>> {
    hash_set("[a-z0-9]{0,8}", size).prop_map(|keys| keys.into_iter().sorted().collect_vec())
}
