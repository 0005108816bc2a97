use crate::error::MapError;
use crate::error::Result;
use crate::hash_map::ObjectBooleanHashMap;
use crate::iter::Cursor;
use crate::iter::Keys;
use crate::strategy::HashingStrategy;

const KEY_ONLY: &str = "a key set cannot add a key without a value";

/// A live view of the keys of an [`ObjectBooleanHashMap`].
///
/// Queries read the backing map and removals delete its entries. Keys cannot
/// be added through the view, since it has no value to pair them with.
///
/// This struct is created by [`ObjectBooleanHashMap::key_set`].
///
/// # Examples
///
/// ```rust
/// use bool_hash::ObjectBooleanHashMap;
///
/// let mut map = ObjectBooleanHashMap::from([("a", true), ("b", false), ("c", true)]);
/// let mut keys = map.key_set();
/// assert!(keys.contains(&"a"));
/// assert!(keys.remove(&"a"));
/// assert!(!keys.remove(&"a"));
/// assert!(keys.add("d").is_err());
///
/// assert_eq!(map, ObjectBooleanHashMap::from([("b", false), ("c", true)]));
/// ```
pub struct KeySet<'a, K, H> {
    map: &'a mut ObjectBooleanHashMap<K, H>,
}

impl<'a, K, H> KeySet<'a, K, H>
where
    H: HashingStrategy<K>,
{
    pub(crate) fn new(map: &'a mut ObjectBooleanHashMap<K, H>) -> Self {
        Self { map }
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the backing map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns `true` if `key` is present in the backing map.
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Returns `true` if every key in `keys` is present.
    pub fn contains_all<'k>(&self, keys: impl IntoIterator<Item = &'k K>) -> bool
    where
        K: 'k,
    {
        keys.into_iter().all(|key| self.contains(key))
    }

    /// Returns an iterator over the keys.
    pub fn iter(&self) -> Keys<'_, K> {
        self.map.keys()
    }

    /// Returns a cursor over the keys that removes entries from the backing
    /// map.
    pub fn cursor(&mut self) -> KeySetCursor<'_, K, H> {
        KeySetCursor {
            inner: self.map.cursor(),
        }
    }

    /// Always fails with [`MapError::UnsupportedOperation`].
    pub fn add(&mut self, _key: K) -> Result<bool> {
        Err(MapError::UnsupportedOperation(KEY_ONLY))
    }

    /// Always fails with [`MapError::UnsupportedOperation`].
    pub fn add_all(&mut self, _keys: impl IntoIterator<Item = K>) -> Result<bool> {
        Err(MapError::UnsupportedOperation(KEY_ONLY))
    }

    /// Removes `key` and its value from the backing map. Returns `true` if
    /// the key was present.
    pub fn remove(&mut self, key: &K) -> bool {
        self.map.remove(key).is_some()
    }

    /// Removes every key in `keys`. Returns `true` if anything was removed.
    pub fn remove_all<'k>(&mut self, keys: impl IntoIterator<Item = &'k K>) -> bool
    where
        K: 'k,
    {
        keys.into_iter()
            .fold(false, |changed, key| self.remove(key) | changed)
    }

    /// Keeps only the keys for which `predicate` returns `true`. Returns
    /// `true` if anything was removed.
    pub fn retain(&mut self, mut predicate: impl FnMut(&K) -> bool) -> bool {
        self.map.remove_if(|key, _| !predicate(key))
    }

    /// Keeps only the keys also present in `keys`, comparing them with the
    /// backing map's hashing strategy. Returns `true` if anything was
    /// removed.
    pub fn retain_all<'k>(&mut self, keys: impl IntoIterator<Item = &'k K>) -> bool
    where
        K: 'k,
    {
        let doomed: Vec<usize> = {
            let strategy = ByRef(self.map.hashing_strategy());
            let mut kept = ObjectBooleanHashMap::with_hashing_strategy(strategy);
            kept.extend(keys.into_iter().map(|key| (key, true)));
            self.map
                .table
                .iter()
                .filter(|(_, key, _)| !kept.contains_key(key))
                .map(|(index, _, _)| index)
                .collect()
        };
        for &index in &doomed {
            self.map.remove_at(index);
        }
        !doomed.is_empty()
    }

    /// Removes every entry from the backing map.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<'s, K, H> IntoIterator for &'s KeySet<'_, K, H>
where
    H: HashingStrategy<K>,
{
    type Item = &'s K;
    type IntoIter = Keys<'s, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Hashes and compares borrowed keys with the strategy of their owner.
struct ByRef<'s, H>(&'s H);

impl<K, H> HashingStrategy<&K> for ByRef<'_, H>
where
    H: HashingStrategy<K>,
{
    fn hash_code(&self, key: &&K) -> u64 {
        self.0.hash_code(key)
    }

    fn equals(&self, a: &&K, b: &&K) -> bool {
        self.0.equals(a, b)
    }
}

/// A removing cursor over the keys of a map.
///
/// Behaves like [`Cursor`], yielding only keys.
///
/// This struct is created by [`KeySet::cursor`].
pub struct KeySetCursor<'a, K, H> {
    inner: Cursor<'a, K, H>,
}

impl<K, H> KeySetCursor<'_, K, H>
where
    H: HashingStrategy<K>,
{
    /// Returns `true` if [`advance`](Self::advance) will return a key.
    pub fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    /// Returns the next key, or [`MapError::NoSuchElement`] once exhausted.
    pub fn advance(&mut self) -> Result<&K> {
        self.inner.advance().map(|(key, _)| key)
    }

    /// Removes the key last returned, and its value, from the backing map.
    pub fn remove(&mut self) -> Result<()> {
        self.inner.remove()
    }
}
