use crate::error::MapError;
use crate::error::Result;

/// Read access shared by every object-to-boolean map flavour: the mutable
/// [`ObjectBooleanHashMap`](crate::ObjectBooleanHashMap), its read-only and
/// immutable adapters, and the synchronized wrapper.
///
/// Queries return values rather than references, so the trait is object-safe
/// and implementable by a wrapper that holds a lock only for the duration of
/// each call.
pub trait ObjectBooleanMap<K> {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the map holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value mapped to `key`, if any.
    fn get(&self, key: &K) -> Option<bool>;

    /// Returns the value mapped to `key`, or `if_absent`.
    fn get_if_absent(&self, key: &K, if_absent: bool) -> bool {
        self.get(key).unwrap_or(if_absent)
    }

    /// Returns the value mapped to `key`, failing with
    /// [`MapError::IllegalState`] if the key is absent.
    fn get_or_throw(&self, key: &K) -> Result<bool> {
        self.get(key)
            .ok_or(MapError::IllegalState("key is not present in the map"))
    }

    /// Returns `true` if `key` is mapped to a value.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns `true` if at least one key maps to `value`.
    fn contains_value(&self, value: bool) -> bool;

    /// Visits every entry once, in unspecified order.
    fn for_each_key_value(&self, f: &mut dyn FnMut(&K, bool));

    /// Returns `true` if both maps hold the same key/value pairs, irrespective
    /// of their internal order. Keys of `self` are looked up in `other`.
    fn content_equals(&self, other: &dyn ObjectBooleanMap<K>) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut equal = true;
        self.for_each_key_value(&mut |key, value| {
            equal = equal && other.get(key) == Some(value);
        });
        equal
    }
}
