use std::collections::HashMap;
use std::hash::{BuildHasherDefault, Hash};

use fnv::FnvHasher;

pub type FnvHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FnvHasher>>;

/// Hash map with the given capacity, keyed with the fnv hasher. Much faster
/// than the stdlib default on small keys like cell indices, at the price of
/// weaker resistance to crafted key collisions.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    let fnv = BuildHasherDefault::<FnvHasher>::default();
    HashMap::with_capacity_and_hasher(capacity, fnv)
}
