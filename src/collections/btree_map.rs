use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::prelude::*;

impl<K, V> OrderedMap<K, V> for BTreeMap<K, V>
where
    K: Arbitrary + Ord + Clone + 'static,
    V: Arbitrary + Clone + PartialEq + 'static,
{
    fn get(&self, key: &K) -> Option<&V> {
        BTreeMap::get(self, key)
    }

    fn set(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn keys(&self) -> Vec<K> {
        BTreeMap::keys(self).cloned().collect()
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    pub type Model = BTreeMap<String, Vec<u8>>;

    crate::test_ordered_map_properties!(Model, String, Vec<u8>);
}
