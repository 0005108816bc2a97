use core::fmt::Debug;
use core::fmt::Display;

use parking_lot::Mutex;

use crate::error::Result;
use crate::hash_map::ObjectBooleanHashMap;
use crate::immutable::ImmutableObjectBooleanMap;
use crate::map::ObjectBooleanMap;
use crate::strategy::HashingStrategy;

/// An object-to-boolean map guarded by a single lock.
///
/// Every method acquires the lock once and releases it before returning, so
/// each call is atomic with respect to every other call. There is no finer
/// grained locking. Iteration, which spans many accesses, goes through
/// [`with_lock`](Self::with_lock) and holds the lock for the whole closure.
///
/// Suppliers and functions passed to methods such as
/// [`get_if_absent_put_with`](Self::get_if_absent_put_with) run while the
/// lock is held and must not call back into the same map; the lock is not
/// reentrant and doing so deadlocks.
///
/// This struct is created by [`ObjectBooleanHashMap::as_synchronized`].
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
///
/// use bool_hash::ObjectBooleanHashMap;
///
/// let map = Arc::new(ObjectBooleanHashMap::<u32>::new().as_synchronized());
/// let workers: Vec<_> = (0..4u32)
///     .map(|worker| {
///         let map = Arc::clone(&map);
///         thread::spawn(move || {
///             for i in 0..100 {
///                 map.put(worker * 100 + i, i % 2 == 0);
///             }
///         })
///     })
///     .collect();
/// for worker in workers {
///     worker.join().unwrap();
/// }
/// assert_eq!(map.len(), 400);
/// assert_eq!(map.with_lock(|m| m.count(|v| v)), 200);
/// ```
pub struct SynchronizedObjectBooleanMap<K, H> {
    inner: Mutex<ObjectBooleanHashMap<K, H>>,
}

impl<K, H> SynchronizedObjectBooleanMap<K, H>
where
    H: HashingStrategy<K>,
{
    pub(crate) fn new(map: ObjectBooleanHashMap<K, H>) -> Self {
        Self {
            inner: Mutex::new(map),
        }
    }

    /// Runs `f` with exclusive access to the underlying map and returns its
    /// result. The lock is held until `f` returns.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut ObjectBooleanHashMap<K, H>) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    /// Consumes the wrapper and returns the underlying map.
    pub fn into_inner(self) -> ObjectBooleanHashMap<K, H> {
        self.inner.into_inner()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the value mapped to `key`, if any.
    pub fn get(&self, key: &K) -> Option<bool> {
        self.inner.lock().get(key)
    }

    /// Returns the value mapped to `key`, or `if_absent`.
    pub fn get_if_absent(&self, key: &K, if_absent: bool) -> bool {
        self.inner.lock().get_if_absent(key, if_absent)
    }

    /// Returns the value mapped to `key`, failing with
    /// [`MapError::IllegalState`](crate::MapError::IllegalState) if the key
    /// is absent.
    pub fn get_or_throw(&self, key: &K) -> Result<bool> {
        self.inner.lock().get_or_throw(key)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.lock().contains_key(key)
    }

    /// Returns `true` if at least one key maps to `value`.
    pub fn contains_value(&self, value: bool) -> bool {
        self.inner.lock().contains_value(value)
    }

    /// Maps `key` to `value`, returning the previous value.
    pub fn put(&self, key: K, value: bool) -> Option<bool> {
        self.inner.lock().put(key, value)
    }

    /// Copies every entry of `other` into the map.
    pub fn put_all<H2>(&self, other: &ObjectBooleanHashMap<K, H2>)
    where
        K: Clone,
        H2: HashingStrategy<K>,
    {
        self.inner.lock().put_all(other);
    }

    /// Removes `key` if present.
    pub fn remove_key(&self, key: &K) {
        self.inner.lock().remove_key(key);
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&self, key: &K) -> Option<bool> {
        self.inner.lock().remove(key)
    }

    /// Removes `key`, returning its value or `if_absent`.
    pub fn remove_key_if_absent(&self, key: &K, if_absent: bool) -> bool {
        self.inner.lock().remove_key_if_absent(key, if_absent)
    }

    /// Removes every entry matching `predicate`, under one lock acquisition.
    pub fn remove_if(&self, predicate: impl FnMut(&K, bool) -> bool) -> bool {
        self.inner.lock().remove_if(predicate)
    }

    /// Returns the value mapped to `key`, storing `value` first if absent.
    pub fn get_if_absent_put(&self, key: K, value: bool) -> bool {
        self.inner.lock().get_if_absent_put(key, value)
    }

    /// Returns the value mapped to `key`. If absent, `supplier` runs exactly
    /// once, under the lock, and its result is stored.
    pub fn get_if_absent_put_with(&self, key: K, supplier: impl FnOnce() -> bool) -> bool {
        self.inner.lock().get_if_absent_put_with(key, supplier)
    }

    /// Like [`get_if_absent_put_with`](Self::get_if_absent_put_with), with the
    /// key passed to `function`.
    pub fn get_if_absent_put_with_key(
        &self,
        key: K,
        function: impl FnOnce(&K) -> bool,
    ) -> bool {
        self.inner.lock().get_if_absent_put_with_key(key, function)
    }

    /// Atomically replaces the value of `key` with `function` of its current
    /// value, or of `if_absent`.
    pub fn update_value(
        &self,
        key: K,
        if_absent: bool,
        function: impl FnOnce(bool) -> bool,
    ) -> bool {
        self.inner.lock().update_value(key, if_absent, function)
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Maps `key` to `value` and returns this map for chaining.
    pub fn with_key_value(&self, key: K, value: bool) -> &Self {
        self.put(key, value);
        self
    }

    /// Removes `key` and returns this map for chaining.
    pub fn without_key(&self, key: &K) -> &Self {
        self.remove_key(key);
        self
    }

    /// Counts the values satisfying `predicate`.
    pub fn count(&self, predicate: impl FnMut(bool) -> bool) -> usize {
        self.inner.lock().count(predicate)
    }

    /// Returns `true` if any value satisfies `predicate`.
    pub fn any_satisfy(&self, predicate: impl FnMut(bool) -> bool) -> bool {
        self.inner.lock().any_satisfy(predicate)
    }

    /// Returns `true` if every value satisfies `predicate`.
    pub fn all_satisfy(&self, predicate: impl FnMut(bool) -> bool) -> bool {
        self.inner.lock().all_satisfy(predicate)
    }

    /// Returns `true` if no value satisfies `predicate`.
    pub fn none_satisfy(&self, predicate: impl FnMut(bool) -> bool) -> bool {
        self.inner.lock().none_satisfy(predicate)
    }

    /// Calls `f` with every entry while holding the lock.
    pub fn for_each_key_value(&self, f: impl FnMut(&K, bool)) {
        self.inner.lock().for_each_key_value(f);
    }

    /// Returns an immutable snapshot of the current contents.
    pub fn to_immutable(&self) -> ImmutableObjectBooleanMap<K, H>
    where
        K: Clone,
        H: Clone,
    {
        self.inner.lock().to_immutable()
    }

    /// Renders the entries as `key=value` joined by `separator`.
    pub fn make_string(&self, separator: &str) -> String
    where
        K: Display,
    {
        self.inner.lock().make_string(separator)
    }
}

impl<K, H> SynchronizedObjectBooleanMap<K, H>
where
    K: Clone,
    H: HashingStrategy<K>,
{
    /// Copies the entries out so callers can visit them after the lock is
    /// released.
    fn snapshot(&self) -> Vec<(K, bool)> {
        self.inner
            .lock()
            .iter()
            .map(|(key, value)| (key.clone(), value))
            .collect()
    }
}

/// Visiting and comparing work on a copy of the entries, so neither the
/// visitor nor the other map ever runs while this lock is held.
impl<K, H> ObjectBooleanMap<K> for SynchronizedObjectBooleanMap<K, H>
where
    K: Clone,
    H: HashingStrategy<K>,
{
    fn len(&self) -> usize {
        self.inner.lock().len()
    }

    fn get(&self, key: &K) -> Option<bool> {
        self.inner.lock().get(key)
    }

    fn contains_value(&self, value: bool) -> bool {
        self.inner.lock().contains_value(value)
    }

    fn for_each_key_value(&self, f: &mut dyn FnMut(&K, bool)) {
        for (key, value) in &self.snapshot() {
            f(key, *value);
        }
    }

    fn content_equals(&self, other: &dyn ObjectBooleanMap<K>) -> bool {
        if core::ptr::addr_eq(self, other) {
            return true;
        }
        let entries = self.snapshot();
        entries.len() == other.len()
            && entries
                .iter()
                .all(|(key, value)| other.get(key) == Some(*value))
    }
}

impl<K, H> Debug for SynchronizedObjectBooleanMap<K, H>
where
    K: Debug,
    H: HashingStrategy<K>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&*self.inner.lock(), f)
    }
}

impl<K, H> Display for SynchronizedObjectBooleanMap<K, H>
where
    K: Display,
    H: HashingStrategy<K>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&*self.inner.lock(), f)
    }
}

impl<K, H> From<ObjectBooleanHashMap<K, H>> for SynchronizedObjectBooleanMap<K, H>
where
    H: HashingStrategy<K>,
{
    fn from(map: ObjectBooleanHashMap<K, H>) -> Self {
        Self::new(map)
    }
}
