use core::fmt::Debug;
use core::fmt::Display;
use core::hash::Hash;
use core::hash::Hasher;

use crate::error::MapError;
use crate::error::Result;
use crate::hash_map::ObjectBooleanHashMap;
use crate::immutable::ImmutableObjectBooleanMap;
use crate::iter::Iter;
use crate::iter::Keys;
use crate::iter::Values;
use crate::map::ObjectBooleanMap;
use crate::strategy::HashingStrategy;

const READ_ONLY: &str = "cannot modify a read-only map";

/// A read-only view of an [`ObjectBooleanHashMap`].
///
/// Reads go to the borrowed delegate, so the view always shows its current
/// contents. Every mutator fails with [`MapError::UnsupportedOperation`].
/// The `get_if_absent_put*` family still returns the value of a key that is
/// already present, and fails without calling the supplier otherwise.
///
/// This struct is created by [`ObjectBooleanHashMap::as_unmodifiable`].
///
/// # Examples
///
/// ```rust
/// use bool_hash::MapError;
/// use bool_hash::ObjectBooleanHashMap;
///
/// let map = ObjectBooleanHashMap::new_with_key_value("k", true);
/// let mut view = map.as_unmodifiable();
///
/// assert_eq!(view.get(&"k"), Some(true));
/// assert_eq!(view.get_if_absent_put("k", false), Ok(true));
/// assert!(matches!(
///     view.put("j", false),
///     Err(MapError::UnsupportedOperation(_))
/// ));
/// ```
pub struct UnmodifiableObjectBooleanMap<'a, K, H> {
    delegate: &'a ObjectBooleanHashMap<K, H>,
}

impl<K, H> Clone for UnmodifiableObjectBooleanMap<'_, K, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, H> Copy for UnmodifiableObjectBooleanMap<'_, K, H> {}

impl<'a, K, H> UnmodifiableObjectBooleanMap<'a, K, H>
where
    H: HashingStrategy<K>,
{
    pub(crate) fn new(delegate: &'a ObjectBooleanHashMap<K, H>) -> Self {
        Self { delegate }
    }

    /// Returns the map this view reads from.
    pub fn delegate(&self) -> &'a ObjectBooleanHashMap<K, H> {
        self.delegate
    }

    /// Returns a read-only view of the same delegate. Wrapping twice does not
    /// nest.
    pub fn as_unmodifiable(&self) -> Self {
        *self
    }

    /// Returns an immutable snapshot of the delegate's current contents.
    pub fn to_immutable(&self) -> ImmutableObjectBooleanMap<K, H>
    where
        K: Clone,
        H: Clone,
    {
        self.delegate.to_immutable()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.delegate.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.delegate.is_empty()
    }

    /// Returns the value mapped to `key`, if any.
    pub fn get(&self, key: &K) -> Option<bool> {
        self.delegate.get(key)
    }

    /// Returns the value mapped to `key`, or `if_absent`.
    pub fn get_if_absent(&self, key: &K, if_absent: bool) -> bool {
        self.delegate.get_if_absent(key, if_absent)
    }

    /// Returns the value mapped to `key`, failing with
    /// [`MapError::IllegalState`] if the key is absent.
    pub fn get_or_throw(&self, key: &K) -> Result<bool> {
        self.delegate.get_or_throw(key)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.delegate.contains_key(key)
    }

    /// Returns `true` if at least one key maps to `value`.
    pub fn contains_value(&self, value: bool) -> bool {
        self.delegate.contains_value(value)
    }

    /// Returns an iterator over `(key, value)` pairs.
    pub fn iter(&self) -> Iter<'a, K> {
        self.delegate.iter()
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> Keys<'a, K> {
        self.delegate.keys()
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> Values<'a, K> {
        self.delegate.values()
    }

    /// Calls `f` with every key.
    pub fn for_each_key(&self, f: impl FnMut(&K)) {
        self.delegate.for_each_key(f);
    }

    /// Calls `f` with every value.
    pub fn for_each_value(&self, f: impl FnMut(bool)) {
        self.delegate.for_each_value(f);
    }

    /// Calls `f` with every entry.
    pub fn for_each_key_value(&self, f: impl FnMut(&K, bool)) {
        self.delegate.for_each_key_value(f);
    }

    /// Counts the values satisfying `predicate`.
    pub fn count(&self, predicate: impl FnMut(bool) -> bool) -> usize {
        self.delegate.count(predicate)
    }

    /// Returns `true` if any value satisfies `predicate`.
    pub fn any_satisfy(&self, predicate: impl FnMut(bool) -> bool) -> bool {
        self.delegate.any_satisfy(predicate)
    }

    /// Returns `true` if every value satisfies `predicate`.
    pub fn all_satisfy(&self, predicate: impl FnMut(bool) -> bool) -> bool {
        self.delegate.all_satisfy(predicate)
    }

    /// Returns `true` if no value satisfies `predicate`.
    pub fn none_satisfy(&self, predicate: impl FnMut(bool) -> bool) -> bool {
        self.delegate.none_satisfy(predicate)
    }

    /// Renders the entries as `key=value` joined by `separator`.
    pub fn make_string(&self, separator: &str) -> String
    where
        K: Display,
    {
        self.delegate.make_string(separator)
    }

    /// Renders the entries between `start` and `end`.
    pub fn make_string_with(&self, start: &str, separator: &str, end: &str) -> String
    where
        K: Display,
    {
        self.delegate.make_string_with(start, separator, end)
    }

    /// Always fails with [`MapError::UnsupportedOperation`].
    pub fn put(&mut self, _key: K, _value: bool) -> Result<Option<bool>> {
        Err(MapError::UnsupportedOperation(READ_ONLY))
    }

    /// Always fails with [`MapError::UnsupportedOperation`].
    pub fn put_all<H2>(&mut self, _other: &ObjectBooleanHashMap<K, H2>) -> Result<()> {
        Err(MapError::UnsupportedOperation(READ_ONLY))
    }

    /// Always fails with [`MapError::UnsupportedOperation`].
    pub fn remove_key(&mut self, _key: &K) -> Result<()> {
        Err(MapError::UnsupportedOperation(READ_ONLY))
    }

    /// Always fails with [`MapError::UnsupportedOperation`].
    pub fn remove(&mut self, _key: &K) -> Result<Option<bool>> {
        Err(MapError::UnsupportedOperation(READ_ONLY))
    }

    /// Always fails with [`MapError::UnsupportedOperation`].
    pub fn remove_key_if_absent(&mut self, _key: &K, _if_absent: bool) -> Result<bool> {
        Err(MapError::UnsupportedOperation(READ_ONLY))
    }

    /// Always fails with [`MapError::UnsupportedOperation`].
    pub fn update_value(
        &mut self,
        _key: K,
        _if_absent: bool,
        _function: impl FnOnce(bool) -> bool,
    ) -> Result<bool> {
        Err(MapError::UnsupportedOperation(READ_ONLY))
    }

    /// Always fails with [`MapError::UnsupportedOperation`].
    pub fn clear(&mut self) -> Result<()> {
        Err(MapError::UnsupportedOperation(READ_ONLY))
    }

    /// Always fails with [`MapError::UnsupportedOperation`].
    pub fn with_key_value(&mut self, _key: K, _value: bool) -> Result<&mut Self> {
        Err(MapError::UnsupportedOperation(READ_ONLY))
    }

    /// Always fails with [`MapError::UnsupportedOperation`].
    pub fn without_key(&mut self, _key: &K) -> Result<&mut Self> {
        Err(MapError::UnsupportedOperation(READ_ONLY))
    }

    /// Always fails with [`MapError::UnsupportedOperation`].
    pub fn without_all_keys<'k>(
        &mut self,
        _keys: impl IntoIterator<Item = &'k K>,
    ) -> Result<&mut Self>
    where
        K: 'k,
    {
        Err(MapError::UnsupportedOperation(READ_ONLY))
    }

    /// Returns the value of `key` if present; otherwise fails with
    /// [`MapError::UnsupportedOperation`].
    pub fn get_if_absent_put(&mut self, key: K, _value: bool) -> Result<bool> {
        self.get_present(&key)
    }

    /// Returns the value of `key` if present; otherwise fails with
    /// [`MapError::UnsupportedOperation`] without calling `supplier`.
    pub fn get_if_absent_put_with(
        &mut self,
        key: K,
        _supplier: impl FnOnce() -> bool,
    ) -> Result<bool> {
        self.get_present(&key)
    }

    /// Returns the value of `key` if present; otherwise fails with
    /// [`MapError::UnsupportedOperation`] without calling `function`.
    pub fn get_if_absent_put_with_key(
        &mut self,
        key: K,
        _function: impl FnOnce(&K) -> bool,
    ) -> Result<bool> {
        self.get_present(&key)
    }

    fn get_present(&self, key: &K) -> Result<bool> {
        self.delegate
            .get(key)
            .ok_or(MapError::UnsupportedOperation(READ_ONLY))
    }
}

impl<K, H> ObjectBooleanMap<K> for UnmodifiableObjectBooleanMap<'_, K, H>
where
    H: HashingStrategy<K>,
{
    fn len(&self) -> usize {
        self.delegate.len()
    }

    fn get(&self, key: &K) -> Option<bool> {
        self.delegate.get(key)
    }

    fn contains_value(&self, value: bool) -> bool {
        self.delegate.contains_value(value)
    }

    fn for_each_key_value(&self, f: &mut dyn FnMut(&K, bool)) {
        ObjectBooleanMap::for_each_key_value(self.delegate, f);
    }
}

impl<K, H> PartialEq for UnmodifiableObjectBooleanMap<'_, K, H>
where
    H: HashingStrategy<K>,
{
    fn eq(&self, other: &Self) -> bool {
        self.delegate == other.delegate
    }
}

impl<K, H> Eq for UnmodifiableObjectBooleanMap<'_, K, H> where H: HashingStrategy<K> {}

impl<K, H> Hash for UnmodifiableObjectBooleanMap<'_, K, H>
where
    K: Hash,
    H: HashingStrategy<K>,
{
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.delegate.hash(state);
    }
}

impl<K, H> Debug for UnmodifiableObjectBooleanMap<'_, K, H>
where
    K: Debug,
    H: HashingStrategy<K>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(self.delegate, f)
    }
}

impl<K, H> Display for UnmodifiableObjectBooleanMap<'_, K, H>
where
    K: Display,
    H: HashingStrategy<K>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(self.delegate, f)
    }
}

impl<'a, K, H> IntoIterator for UnmodifiableObjectBooleanMap<'a, K, H>
where
    H: HashingStrategy<K>,
{
    type Item = (&'a K, bool);
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.delegate.iter()
    }
}
