use core::fmt::Debug;
use core::fmt::Display;
use core::hash::Hash;
use core::hash::Hasher;
use core::ops::Deref;
use std::sync::Arc;

use crate::hash_map::ObjectBooleanHashMap;
use crate::map::ObjectBooleanMap;
use crate::strategy::HashingStrategy;

/// An immutable, cheaply shared snapshot of an object-to-boolean map.
///
/// Clones share one allocation. Read access goes through [`Deref`] to the
/// snapshot map, and only shared borrows are ever handed out, so no mutator
/// is reachable. "Modifying" builders such as
/// [`new_with_key_value`](Self::new_with_key_value) return a new snapshot and
/// leave this one untouched.
///
/// This struct is created by [`ObjectBooleanHashMap::to_immutable`].
///
/// # Examples
///
/// ```rust
/// use bool_hash::ObjectBooleanHashMap;
///
/// let mut map = ObjectBooleanHashMap::new_with_key_value("a", true);
/// let snapshot = map.to_immutable();
/// map.put("b", false);
///
/// let extended = snapshot.new_with_key_value("c", true);
/// assert_eq!(snapshot.len(), 1);
/// assert_eq!(extended.len(), 2);
/// assert_eq!(extended.get(&"c"), Some(true));
/// ```
pub struct ImmutableObjectBooleanMap<K, H> {
    inner: Arc<ObjectBooleanHashMap<K, H>>,
}

impl<K, H> Clone for ImmutableObjectBooleanMap<K, H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, H> ImmutableObjectBooleanMap<K, H>
where
    H: HashingStrategy<K>,
{
    pub(crate) fn from_map(map: ObjectBooleanHashMap<K, H>) -> Self {
        Self {
            inner: Arc::new(map),
        }
    }

    /// Returns this snapshot. Snapshots are already immutable, so no copy is
    /// made and the result shares storage with `self`.
    pub fn to_immutable(&self) -> Self {
        self.clone()
    }

    /// Returns `true` if both snapshots share one allocation.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }

    /// Returns a new snapshot that also maps `key` to `value`.
    pub fn new_with_key_value(&self, key: K, value: bool) -> Self
    where
        K: Clone,
        H: Clone,
    {
        let mut map = ObjectBooleanHashMap::clone(&self.inner);
        map.put(key, value);
        Self::from_map(map)
    }

    /// Returns a snapshot without `key`. If the key is absent, the result
    /// shares storage with `self`.
    pub fn new_without_key(&self, key: &K) -> Self
    where
        K: Clone,
        H: Clone,
    {
        if !self.inner.contains_key(key) {
            return self.clone();
        }
        let mut map = ObjectBooleanHashMap::clone(&self.inner);
        map.remove_key(key);
        Self::from_map(map)
    }

    /// Returns a snapshot without any of `keys`.
    pub fn new_without_all_keys<'k>(&self, keys: impl IntoIterator<Item = &'k K>) -> Self
    where
        K: Clone + 'k,
        H: Clone,
    {
        let mut map = ObjectBooleanHashMap::clone(&self.inner);
        map.without_all_keys(keys);
        Self::from_map(map)
    }
}

impl<K, H> Deref for ImmutableObjectBooleanMap<K, H> {
    type Target = ObjectBooleanHashMap<K, H>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<K, H> ObjectBooleanMap<K> for ImmutableObjectBooleanMap<K, H>
where
    H: HashingStrategy<K>,
{
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, key: &K) -> Option<bool> {
        self.inner.get(key)
    }

    fn contains_value(&self, value: bool) -> bool {
        self.inner.contains_value(value)
    }

    fn for_each_key_value(&self, f: &mut dyn FnMut(&K, bool)) {
        ObjectBooleanMap::for_each_key_value(&*self.inner, f);
    }
}

impl<K, H> PartialEq for ImmutableObjectBooleanMap<K, H>
where
    H: HashingStrategy<K>,
{
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || self.inner == other.inner
    }
}

impl<K, H> Eq for ImmutableObjectBooleanMap<K, H> where H: HashingStrategy<K> {}

impl<K, H> Hash for ImmutableObjectBooleanMap<K, H>
where
    K: Hash,
    H: HashingStrategy<K>,
{
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.inner.hash(state);
    }
}

impl<K, H> Debug for ImmutableObjectBooleanMap<K, H>
where
    K: Debug,
    H: HashingStrategy<K>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&*self.inner, f)
    }
}

impl<K, H> Display for ImmutableObjectBooleanMap<K, H>
where
    K: Display,
    H: HashingStrategy<K>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&*self.inner, f)
    }
}

impl<K, H> From<ObjectBooleanHashMap<K, H>> for ImmutableObjectBooleanMap<K, H>
where
    H: HashingStrategy<K>,
{
    fn from(map: ObjectBooleanHashMap<K, H>) -> Self {
        Self::from_map(map)
    }
}

impl<K, H> FromIterator<(K, bool)> for ImmutableObjectBooleanMap<K, H>
where
    H: HashingStrategy<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self::from_map(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn snapshot_is_detached_from_its_source() {
        let mut map = ObjectBooleanHashMap::from([(1, true), (2, false)]);
        let snapshot = map.to_immutable();
        map.put(3, true);
        map.remove_key(&1);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(&1), Some(true));
        assert!(!snapshot.contains_key(&3));
    }

    #[test]
    fn to_immutable_on_a_snapshot_shares_storage() {
        let snapshot = ObjectBooleanHashMap::new_with_key_value("k", true).to_immutable();
        let again = snapshot.to_immutable();
        assert!(ImmutableObjectBooleanMap::ptr_eq(&snapshot, &again));
        assert_eq!(snapshot, again);
    }

    #[test]
    fn builders_return_new_snapshots() {
        let base: ImmutableObjectBooleanMap<u32, _> =
            ObjectBooleanHashMap::from([(1, true), (2, false), (3, true)]).into();

        let with = base.new_with_key_value(4, false);
        assert_eq!(with.len(), 4);
        assert_eq!(base.len(), 3);
        assert!(!ImmutableObjectBooleanMap::ptr_eq(&base, &with));

        let without = base.new_without_key(&2);
        assert_eq!(without.len(), 2);
        assert_eq!(base.get(&2), Some(false));

        let unchanged = base.new_without_key(&99);
        assert!(ImmutableObjectBooleanMap::ptr_eq(&base, &unchanged));

        let pruned = base.new_without_all_keys([&1, &3]);
        assert_eq!(pruned.to_string(), "{2=false}");
        assert_eq!(base.count(|v| v), 2);
    }

    #[test]
    fn snapshot_equality_and_rendering() {
        let a: ImmutableObjectBooleanMap<&str, _> =
            [("x", true), ("y", false)].into_iter().collect::<ObjectBooleanHashMap<_>>().into();
        let b = ObjectBooleanHashMap::from([("y", false), ("x", true)]).to_immutable();
        assert_eq!(a, b);
        assert!(a.content_equals(&*b));
        assert_eq!(format!("{:?}", a.new_without_key(&"y")), "{\"x\": true}");
    }

    #[test]
    fn snapshots_are_shared_across_threads() {
        let snapshot: ImmutableObjectBooleanMap<u32, _> =
            ObjectBooleanHashMap::from([(7, true), (8, false)]).to_immutable();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = snapshot.clone();
                thread::spawn(move || shared.get(&7) == Some(true) && shared.get(&8) == Some(false))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
