//! Hash-maps and hash-sets with a fixed hasher, so that iterating through them visits the
//! entries in the same order on every run.

/// Hashmap using [`hashbrown::HashMap`] with a fixed-seed hasher.
pub type HashMap<K, V> = hashbrown::hash_map::HashMap<K, V, foldhash::fast::FixedState>;

/// Hashset using [`hashbrown::HashSet`] with a fixed-seed hasher.
pub type HashSet<K> = hashbrown::hash_set::HashSet<K, foldhash::fast::FixedState>;
