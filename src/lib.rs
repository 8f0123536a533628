//! An in-memory ordered key-value container, built on an unbalanced binary search tree.
//!
//! The [`Tree`](collections::Tree) maps unique keys (by default `String`) to opaque values (by
//! default `Vec<u8>`), and supports point lookup, insert-or-update and sorted key enumeration.
//! Nodes are never deleted, and the tree is never rebalanced.
//!
//! ```
//! use bstree::collections::Tree;
//!
//! let mut tree: Tree = Tree::new();
//! tree.set("name", "Bob");
//!
//! assert_eq!(tree.get("name").map(Vec::as_slice), Some(&b"Bob"[..]));
//! ```
mod error;

pub mod collections;
pub mod prelude;
pub mod testing;

#[doc(hidden)]
/// This is a hidden module to make the macros defined on this crate available for the users.
pub mod __dependencies {
    pub use itertools;
    pub use paste;
    pub use proptest;
    pub use test_strategy;
}

/// Generates the property tests every [`OrderedMap`](prelude::OrderedMap) must pass, for the
/// given map, key and value types.
#[macro_export]
macro_rules! test_ordered_map_properties {
    ($type:ty, $key:ty, $value:ty) => {
        $crate::__dependencies::paste::paste! {
            mod [<test_ordered_map_ $type:snake>] {
                use $crate::__dependencies::{
                    itertools::Itertools,
                    proptest::prelude::*,
                    test_strategy,
                };
                use $crate::prelude::OrderedMap;

                use super::$type;

                #[test]
                fn test_default_is_empty() {
                    let map = <$type>::default();

                    assert!(OrderedMap::is_empty(&map));
                    assert!(OrderedMap::keys(&map).is_empty());
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_keys_are_strictly_ascending(map: $type) {
                    let keys = OrderedMap::keys(&map);

                    prop_assert!(keys.iter().tuple_windows().all(|(a, b)| a < b));
                    prop_assert_eq!(keys.len(), OrderedMap::len(&map));
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_set_then_get(mut map: $type, key: $key, value: $value) {
                    OrderedMap::set(&mut map, key.clone(), value.clone());

                    prop_assert_eq!(OrderedMap::get(&map, &key), Some(&value));
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_set_on_existing_key_replaces_value(
                    mut map: $type,
                    key: $key,
                    first: $value,
                    second: $value,
                ) {
                    OrderedMap::set(&mut map, key.clone(), first);

                    $crate::prop_assert_does_not_change!(
                        OrderedMap::set(&mut map, key.clone(), second.clone()),
                        OrderedMap::len(&map)
                    );
                    prop_assert_eq!(OrderedMap::get(&map, &key), Some(&second));
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_missing_key_is_absent(map: $type, key: $key) {
                    prop_assume!(!OrderedMap::keys(&map).contains(&key));

                    prop_assert_eq!(OrderedMap::get(&map, &key), None);
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_set_leaves_other_keys_alone(mut map: $type, key: $key, value: $value) {
                    let before = map.clone();
                    OrderedMap::set(&mut map, key.clone(), value);

                    for other in OrderedMap::keys(&before) {
                        if other != key {
                            prop_assert_eq!(
                                OrderedMap::get(&map, &other),
                                OrderedMap::get(&before, &other)
                            );
                        }
                    }
                }
            }
        }
    };
}

#[macro_export]
macro_rules! prop_assert_changes {
    ($action: expr, $value: expr) => {
        let old_value = $value.clone();

        prop_assert_eq!($value, old_value);

        $action;

        prop_assert_ne!($value, old_value);
    };
}

#[macro_export]
macro_rules! prop_assert_does_not_change {
    ($action: expr, $value: expr) => {
        let old_value = $value.clone();

        $action;

        prop_assert_eq!($value, old_value);
    };
}
