use core::fmt::Debug;
use core::fmt::Display;
use core::fmt::Write;
use core::hash::Hash;
use core::hash::Hasher;

use siphasher::sip::SipHasher;

use crate::error::MapError;
use crate::error::Result;
use crate::hash_table::Probe;
use crate::hash_table::SlotTable;
use crate::immutable::ImmutableObjectBooleanMap;
use crate::iter::Cursor;
use crate::iter::Iter;
use crate::iter::Keys;
use crate::iter::Values;
use crate::key_set::KeySet;
use crate::map::ObjectBooleanMap;
use crate::strategy::HashingStrategy;
use crate::strategy::NativeHashing;
#[cfg(feature = "sync")]
use crate::synchronized::SynchronizedObjectBooleanMap;
use crate::unmodifiable::UnmodifiableObjectBooleanMap;
use crate::values::ValuesCollection;

/// A hash map from keys of type `K` to `bool`, using open addressing with
/// linear probing.
///
/// Keys are placed and compared by a [`HashingStrategy`]. The default,
/// [`NativeHashing`], uses the key's own `Hash` and `Eq`; supply another
/// strategy with [`with_hashing_strategy`](Self::with_hashing_strategy) to
/// change what "same key" means.
///
/// A key may be `None` in a map keyed by `Option<T>`; it behaves like any
/// other key.
///
/// # Performance Characteristics
///
/// - **Memory**: one slot of `K` plus a tag per slot, and one bit per slot for
///   the value. At most half the slots are live.
/// - **Removal** leaves a tombstone. Tombstones are dropped whenever the table
///   is rebuilt, which happens on growth or when live entries and tombstones
///   together fill three quarters of the slots.
///
/// # Examples
///
/// ```rust
/// use bool_hash::ObjectBooleanHashMap;
///
/// let mut map = ObjectBooleanHashMap::new();
/// map.put("0", true);
/// map.put("1", true);
/// map.put("2", false);
/// map.remove_key(&"1");
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map, ObjectBooleanHashMap::from([("0", true), ("2", false)]));
/// ```
#[derive(Clone)]
pub struct ObjectBooleanHashMap<K, H = NativeHashing> {
    pub(crate) table: SlotTable<K>,
    strategy: H,
}

impl<K> ObjectBooleanHashMap<K>
where
    K: Hash + Eq,
{
    /// Creates an empty map with the default capacity of 16 slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use bool_hash::ObjectBooleanHashMap;
    /// let map: ObjectBooleanHashMap<String> = ObjectBooleanHashMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 16);
    /// ```
    pub fn new() -> Self {
        Self::with_hashing_strategy(NativeHashing::default())
    }

    /// Creates an empty map able to hold `capacity` entries without growing.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds the largest supported table; use
    /// [`try_with_capacity`](Self::try_with_capacity) to handle that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use bool_hash::ObjectBooleanHashMap;
    /// let map: ObjectBooleanHashMap<u32> = ObjectBooleanHashMap::with_capacity(100);
    /// assert_eq!(map.capacity(), 256);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hashing_strategy(capacity, NativeHashing::default())
    }

    /// Creates an empty map able to hold `capacity` entries without growing,
    /// or fails with [`MapError::IllegalArgument`] if no table is that large.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        Self::try_with_capacity_and_hashing_strategy(capacity, NativeHashing::default())
    }

    /// Creates a map holding a single entry.
    pub fn new_with_key_value(key: K, value: bool) -> Self {
        Self::from([(key, value)])
    }

    /// Creates a map holding two entries. A repeated key keeps the last value.
    pub fn new_with_keys_values(key1: K, value1: bool, key2: K, value2: bool) -> Self {
        Self::from([(key1, value1), (key2, value2)])
    }

    /// Creates a map holding three entries. A repeated key keeps the last
    /// value.
    pub fn new_with_keys_values3(
        key1: K,
        value1: bool,
        key2: K,
        value2: bool,
        key3: K,
        value3: bool,
    ) -> Self {
        Self::from([(key1, value1), (key2, value2), (key3, value3)])
    }

    /// Creates a map holding four entries. A repeated key keeps the last
    /// value. Longer literals go through `From<[(K, bool); N]>`.
    #[allow(clippy::too_many_arguments)]
    pub fn new_with_keys_values4(
        key1: K,
        value1: bool,
        key2: K,
        value2: bool,
        key3: K,
        value3: bool,
        key4: K,
        value4: bool,
    ) -> Self {
        Self::from([(key1, value1), (key2, value2), (key3, value3), (key4, value4)])
    }
}

impl<K, H> ObjectBooleanHashMap<K, H>
where
    H: HashingStrategy<K>,
{
    /// Creates an empty map placing and comparing keys with `strategy`.
    pub fn with_hashing_strategy(strategy: H) -> Self {
        Self::with_capacity_and_hashing_strategy(0, strategy)
    }

    /// Creates an empty map with room for `capacity` entries, placing and
    /// comparing keys with `strategy`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds the largest supported table.
    pub fn with_capacity_and_hashing_strategy(capacity: usize, strategy: H) -> Self {
        Self {
            table: SlotTable::with_capacity(capacity),
            strategy,
        }
    }

    /// Fallible form of
    /// [`with_capacity_and_hashing_strategy`](Self::with_capacity_and_hashing_strategy).
    pub fn try_with_capacity_and_hashing_strategy(capacity: usize, strategy: H) -> Result<Self> {
        Ok(Self {
            table: SlotTable::try_with_capacity(capacity)?,
            strategy,
        })
    }

    /// Returns the strategy placing and comparing keys.
    pub fn hashing_strategy(&self) -> &H {
        &self.strategy
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of physical slots. The map grows once more than
    /// half of them are live.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    #[inline]
    fn index_of(&self, key: &K) -> Option<usize> {
        self.table.find(self.strategy.hash_code(key), |k| {
            self.strategy.equals(k, key)
        })
    }

    #[inline]
    fn probe(&self, key: &K) -> Probe {
        self.table.find_slot(self.strategy.hash_code(key), |k| {
            self.strategy.equals(k, key)
        })
    }

    /// Stores `key` in the free slot `index` returned by a probe for it, then
    /// grows or rebuilds the table as needed.
    fn insert_vacant(&mut self, index: usize, key: K, value: bool) {
        self.table.insert_at(index, key, value);
        let strategy = &self.strategy;
        self.table.rebalance(|k| strategy.hash_code(k));
    }

    /// Maps `key` to `value`, returning the previous value if the key was
    /// present.
    ///
    /// Overwriting an existing key never grows the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use bool_hash::ObjectBooleanHashMap;
    /// let mut map = ObjectBooleanHashMap::new();
    /// assert_eq!(map.put(37, true), None);
    /// assert_eq!(map.put(37, false), Some(true));
    /// assert_eq!(map.get(&37), Some(false));
    /// ```
    pub fn put(&mut self, key: K, value: bool) -> Option<bool> {
        match self.probe(&key) {
            Probe::Found(index) => Some(self.table.replace_value(index, value)),
            Probe::Vacant(index) => {
                self.insert_vacant(index, key, value);
                None
            }
        }
    }

    /// Returns the value mapped to `key`, if any.
    pub fn get(&self, key: &K) -> Option<bool> {
        self.index_of(key)
            .and_then(|index| self.table.entry_at(index))
            .map(|(_, value)| value)
    }

    /// Returns the value mapped to `key`, or `if_absent`.
    pub fn get_if_absent(&self, key: &K, if_absent: bool) -> bool {
        self.get(key).unwrap_or(if_absent)
    }

    /// Returns the value mapped to `key`, failing with
    /// [`MapError::IllegalState`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use bool_hash::ObjectBooleanHashMap;
    /// # use bool_hash::MapError;
    /// let map = ObjectBooleanHashMap::new_with_key_value("on", true);
    /// assert_eq!(map.get_or_throw(&"on"), Ok(true));
    /// assert!(matches!(map.get_or_throw(&"off"), Err(MapError::IllegalState(_))));
    /// ```
    pub fn get_or_throw(&self, key: &K) -> Result<bool> {
        self.get(key)
            .ok_or(MapError::IllegalState("key is not present in the map"))
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.index_of(key).is_some()
    }

    /// Returns `true` if at least one key maps to `value`.
    pub fn contains_value(&self, value: bool) -> bool {
        self.values().any(|v| v == value)
    }

    /// Returns the value mapped to `key`, mapping it to `value` first if it
    /// is absent.
    pub fn get_if_absent_put(&mut self, key: K, value: bool) -> bool {
        self.get_if_absent_put_with(key, || value)
    }

    /// Returns the value mapped to `key`. If the key is absent, `supplier` is
    /// called exactly once and its result is stored and returned; if present,
    /// `supplier` is not called.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use bool_hash::ObjectBooleanHashMap;
    /// let mut map = ObjectBooleanHashMap::new();
    /// assert!(map.get_if_absent_put_with("k", || true));
    /// assert!(map.get_if_absent_put_with("k", || unreachable!()));
    /// ```
    pub fn get_if_absent_put_with(&mut self, key: K, supplier: impl FnOnce() -> bool) -> bool {
        self.get_if_absent_put_with_key(key, |_| supplier())
    }

    /// Like [`get_if_absent_put_with`](Self::get_if_absent_put_with), with the
    /// key passed to the function computing the value.
    pub fn get_if_absent_put_with_key(
        &mut self,
        key: K,
        function: impl FnOnce(&K) -> bool,
    ) -> bool {
        match self.probe(&key) {
            Probe::Found(index) => self.table.entry_at(index).is_some_and(|(_, value)| value),
            Probe::Vacant(index) => {
                let value = function(&key);
                self.insert_vacant(index, key, value);
                value
            }
        }
    }

    /// Maps `key` to `function` applied to its current value, or to
    /// `if_absent` when the key is absent, and returns the stored result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use bool_hash::ObjectBooleanHashMap;
    /// let mut map = ObjectBooleanHashMap::new();
    /// assert!(map.update_value("flag", false, |v| !v));
    /// assert!(!map.update_value("flag", false, |v| !v));
    /// ```
    pub fn update_value(
        &mut self,
        key: K,
        if_absent: bool,
        function: impl FnOnce(bool) -> bool,
    ) -> bool {
        match self.probe(&key) {
            Probe::Found(index) => {
                let current = self.table.entry_at(index).is_some_and(|(_, value)| value);
                let updated = function(current);
                self.table.replace_value(index, updated);
                updated
            }
            Probe::Vacant(index) => {
                let updated = function(if_absent);
                self.insert_vacant(index, key, updated);
                updated
            }
        }
    }

    /// Removes `key` if present. Removing an absent key does nothing.
    pub fn remove_key(&mut self, key: &K) {
        self.remove(key);
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<bool> {
        let index = self.index_of(key)?;
        self.remove_at(index).map(|(_, value)| value)
    }

    /// Removes `key`, returning its value, or `if_absent` if the key was not
    /// present. The map is not modified when the key is absent.
    pub fn remove_key_if_absent(&mut self, key: &K, if_absent: bool) -> bool {
        self.remove(key).unwrap_or(if_absent)
    }

    /// Removes every entry for which `predicate` returns `true`. Returns
    /// `true` if anything was removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use bool_hash::ObjectBooleanHashMap;
    /// let mut map: ObjectBooleanHashMap<u32> = (0..6).map(|i| (i, i < 2)).collect();
    /// assert!(map.remove_if(|key, value| value || key % 2 == 0));
    /// assert_eq!(map.len(), 2);
    /// assert!(!map.remove_if(|_, value| value));
    /// ```
    pub fn remove_if(&mut self, mut predicate: impl FnMut(&K, bool) -> bool) -> bool {
        let before = self.len();
        let mut cursor = self.cursor();
        loop {
            let doomed = match cursor.advance() {
                Ok((key, value)) => predicate(key, value),
                Err(_) => break,
            };
            if doomed && cursor.remove().is_err() {
                break;
            }
        }
        self.len() != before
    }

    /// Removes the entry in slot `index`. Shared by key removal and every
    /// cursor.
    pub(crate) fn remove_at(&mut self, index: usize) -> Option<(K, bool)> {
        self.table.tombstone_at(index)
    }

    /// Removes every entry. The capacity is kept.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Copies every entry of `other` into this map, overwriting values of
    /// keys present in both.
    pub fn put_all<H2>(&mut self, other: &ObjectBooleanHashMap<K, H2>)
    where
        K: Clone,
        H2: HashingStrategy<K>,
    {
        for (key, value) in other.iter() {
            self.put(key.clone(), value);
        }
    }

    /// Maps `key` to `value` and returns this map for chaining.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use bool_hash::ObjectBooleanHashMap;
    /// let mut map = ObjectBooleanHashMap::new();
    /// map.with_key_value(1, true)
    ///     .with_key_value(2, false)
    ///     .without_key(&1);
    /// assert_eq!(map, ObjectBooleanHashMap::new_with_key_value(2, false));
    /// ```
    pub fn with_key_value(&mut self, key: K, value: bool) -> &mut Self {
        self.put(key, value);
        self
    }

    /// Removes `key` and returns this map for chaining.
    pub fn without_key(&mut self, key: &K) -> &mut Self {
        self.remove_key(key);
        self
    }

    /// Removes every key in `keys` and returns this map for chaining.
    pub fn without_all_keys<'k>(&mut self, keys: impl IntoIterator<Item = &'k K>) -> &mut Self
    where
        K: 'k,
    {
        for key in keys {
            self.remove_key(key);
        }
        self
    }

    /// Returns an iterator over `(key, value)` pairs in slot order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.table.iter())
    }

    /// Returns an iterator over the keys in slot order.
    pub fn keys(&self) -> Keys<'_, K> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over the values in slot order.
    pub fn values(&self) -> Values<'_, K> {
        Values::new(self.iter())
    }

    /// Returns a cursor over the entries that supports removing the entry it
    /// last returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use bool_hash::ObjectBooleanHashMap;
    /// let mut map = ObjectBooleanHashMap::from([(1, true), (2, false), (3, true)]);
    /// let mut cursor = map.cursor();
    /// while cursor.has_next() {
    ///     let (_, value) = cursor.advance().unwrap();
    ///     if value {
    ///         cursor.remove().unwrap();
    ///     }
    /// }
    /// assert_eq!(map, ObjectBooleanHashMap::new_with_key_value(2, false));
    /// ```
    pub fn cursor(&mut self) -> Cursor<'_, K, H> {
        Cursor::new(self)
    }

    /// Returns a live view of the keys. Removing through the view removes
    /// from this map.
    pub fn key_set(&mut self) -> KeySet<'_, K, H> {
        KeySet::new(self)
    }

    /// Returns a live view of the values. Removing through the view removes
    /// from this map.
    pub fn values_collection(&mut self) -> ValuesCollection<'_, K, H> {
        ValuesCollection::new(self)
    }

    /// Calls `f` with every key.
    pub fn for_each_key(&self, mut f: impl FnMut(&K)) {
        self.keys().for_each(|key| f(key));
    }

    /// Calls `f` with every value.
    pub fn for_each_value(&self, f: impl FnMut(bool)) {
        self.values().for_each(f);
    }

    /// Calls `f` with every entry.
    pub fn for_each_key_value(&self, mut f: impl FnMut(&K, bool)) {
        self.iter().for_each(|(key, value)| f(key, value));
    }

    /// Counts the values satisfying `predicate`.
    pub fn count(&self, mut predicate: impl FnMut(bool) -> bool) -> usize {
        self.values().filter(|value| predicate(*value)).count()
    }

    /// Returns `true` if any value satisfies `predicate`.
    pub fn any_satisfy(&self, predicate: impl FnMut(bool) -> bool) -> bool {
        self.values().any(predicate)
    }

    /// Returns `true` if every value satisfies `predicate`. Vacuously true for
    /// an empty map.
    pub fn all_satisfy(&self, predicate: impl FnMut(bool) -> bool) -> bool {
        self.values().all(predicate)
    }

    /// Returns `true` if no value satisfies `predicate`.
    pub fn none_satisfy(&self, predicate: impl FnMut(bool) -> bool) -> bool {
        !self.any_satisfy(predicate)
    }

    /// Returns a read-only view of this map.
    pub fn as_unmodifiable(&self) -> UnmodifiableObjectBooleanMap<'_, K, H> {
        UnmodifiableObjectBooleanMap::new(self)
    }

    /// Returns an immutable snapshot equal to this map's current contents.
    pub fn to_immutable(&self) -> ImmutableObjectBooleanMap<K, H>
    where
        K: Clone,
        H: Clone,
    {
        ImmutableObjectBooleanMap::from_map(self.clone())
    }

    /// Moves this map behind a single lock.
    #[cfg(feature = "sync")]
    pub fn as_synchronized(self) -> SynchronizedObjectBooleanMap<K, H> {
        SynchronizedObjectBooleanMap::new(self)
    }

    /// Renders the entries as `key=value` joined by `separator`.
    pub fn make_string(&self, separator: &str) -> String
    where
        K: Display,
    {
        self.make_string_with("", separator, "")
    }

    /// Renders the entries as `key=value` joined by `separator`, between
    /// `start` and `end`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use bool_hash::ObjectBooleanHashMap;
    /// let map = ObjectBooleanHashMap::new_with_key_value("a", true);
    /// assert_eq!(map.make_string_with("[", "; ", "]"), "[a=true]");
    /// assert_eq!(map.to_string(), "{a=true}");
    /// ```
    pub fn make_string_with(&self, start: &str, separator: &str, end: &str) -> String
    where
        K: Display,
    {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_entries(&mut out, self.iter(), start, separator, end);
        out
    }

    /// Returns the probe distance histogram of the underlying table.
    #[cfg(feature = "stats")]
    pub fn probe_histogram(&self) -> crate::hash_table::ProbeHistogram {
        self.table
            .probe_histogram(|k| self.strategy.hash_code(k))
    }

    /// Returns a snapshot of the underlying table's statistics.
    #[cfg(feature = "stats")]
    pub fn debug_stats(&self) -> crate::hash_table::DebugStats {
        self.table.debug_stats()
    }
}

/// Writes `key=value` pairs joined by `separator` between `start` and `end`.
pub(crate) fn write_entries<'a, K: Display + 'a>(
    out: &mut impl Write,
    entries: impl Iterator<Item = (&'a K, bool)>,
    start: &str,
    separator: &str,
    end: &str,
) -> core::fmt::Result {
    out.write_str(start)?;
    for (i, (key, value)) in entries.enumerate() {
        if i > 0 {
            out.write_str(separator)?;
        }
        write!(out, "{key}={value}")?;
    }
    out.write_str(end)
}

/// Order-independent digest of a map's entries: the wrapping sum of each
/// entry's fixed-key SipHash.
pub(crate) fn entries_hash<'a, K: Hash + 'a>(
    entries: impl Iterator<Item = (&'a K, bool)>,
) -> u64 {
    entries.fold(0u64, |sum, (key, value)| {
        let mut hasher = SipHasher::new();
        key.hash(&mut hasher);
        value.hash(&mut hasher);
        sum.wrapping_add(hasher.finish())
    })
}

impl<K, H> ObjectBooleanMap<K> for ObjectBooleanHashMap<K, H>
where
    H: HashingStrategy<K>,
{
    fn len(&self) -> usize {
        self.len()
    }

    fn get(&self, key: &K) -> Option<bool> {
        self.get(key)
    }

    fn contains_value(&self, value: bool) -> bool {
        self.contains_value(value)
    }

    fn for_each_key_value(&self, f: &mut dyn FnMut(&K, bool)) {
        self.iter().for_each(|(key, value)| f(key, value));
    }
}

impl<K, H> Debug for ObjectBooleanHashMap<K, H>
where
    K: Debug,
    H: HashingStrategy<K>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, H> Display for ObjectBooleanHashMap<K, H>
where
    K: Display,
    H: HashingStrategy<K>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write_entries(f, self.iter(), "{", ", ", "}")
    }
}

impl<K, H> PartialEq for ObjectBooleanHashMap<K, H>
where
    H: HashingStrategy<K>,
{
    fn eq(&self, other: &Self) -> bool {
        self.content_equals(other)
    }
}

impl<K, H> Eq for ObjectBooleanHashMap<K, H> where H: HashingStrategy<K> {}

impl<K, H> Hash for ObjectBooleanHashMap<K, H>
where
    K: Hash,
    H: HashingStrategy<K>,
{
    fn hash<S: Hasher>(&self, state: &mut S) {
        state.write_usize(self.len());
        state.write_u64(entries_hash(self.iter()));
    }
}

impl<K, H> Default for ObjectBooleanHashMap<K, H>
where
    H: HashingStrategy<K> + Default,
{
    fn default() -> Self {
        Self::with_hashing_strategy(H::default())
    }
}

impl<K, H> Extend<(K, bool)> for ObjectBooleanHashMap<K, H>
where
    H: HashingStrategy<K>,
{
    fn extend<I: IntoIterator<Item = (K, bool)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, H> FromIterator<(K, bool)> for ObjectBooleanHashMap<K, H>
where
    H: HashingStrategy<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map =
            Self::with_capacity_and_hashing_strategy(iter.size_hint().0, H::default());
        map.extend(iter);
        map
    }
}

impl<K, const N: usize> From<[(K, bool); N]> for ObjectBooleanHashMap<K>
where
    K: Hash + Eq,
{
    /// Builds a map from literal pairs. A repeated key keeps its last value.
    fn from(entries: [(K, bool); N]) -> Self {
        let mut map = Self::with_capacity(N);
        map.extend(entries);
        map
    }
}

impl<'a, K, H> IntoIterator for &'a ObjectBooleanHashMap<K, H>
where
    H: HashingStrategy<K>,
{
    type Item = (&'a K, bool);
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
