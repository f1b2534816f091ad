//! Backing map of [`QueryValues`](crate::QueryValues).
//!
//! With the `indexmap` feature keys iterate in insertion order, otherwise in
//! sorted order. Neither is part of the encoding contract:
//! [`QueryValues::encode`](crate::QueryValues::encode) always sorts.

#[cfg(feature = "indexmap")]
pub(crate) type Map<K, V> = indexmap::IndexMap<K, V>;

#[cfg(not(feature = "indexmap"))]
pub(crate) type Map<K, V> = std::collections::BTreeMap<K, V>;

#[cfg(feature = "indexmap")]
pub(crate) fn remove<V>(map: &mut Map<String, V>, key: &str) -> Option<V> {
    map.shift_remove(key)
}

#[cfg(not(feature = "indexmap"))]
pub(crate) fn remove<V>(map: &mut Map<String, V>, key: &str) -> Option<V> {
    map.remove(key)
}
