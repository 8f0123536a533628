use proptest::prelude::*;

pub use crate::{collections::*, error::*};

/// Point lookup, insert-or-update and ordered key enumeration over a set of unique keys.
pub trait OrderedMap<K, V>: Sized + Arbitrary + Default + Clone + PartialEq {
    fn get(&self, key: &K) -> Option<&V>;

    /// Stores `value` under `key`, replacing any previous value for that key.
    fn set(&mut self, key: K, value: V);

    /// Returns all keys in ascending order, as a snapshot.
    fn keys(&self) -> Vec<K>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
