//! Enumeration over the live entries of an [`ObjectBooleanHashMap`].
//!
//! [`Iter`], [`Keys`] and [`Values`] are ordinary lazy iterators over shared
//! borrows and never remove anything. [`Cursor`] holds the map exclusively and
//! can remove the entry it last returned.

use crate::error::MapError;
use crate::error::Result;
use crate::hash_map::ObjectBooleanHashMap;
use crate::hash_table;
use crate::strategy::HashingStrategy;

const READ_ONLY: &str = "remove is not supported by a read-only iterator";

/// An iterator over the `(key, value)` pairs of a map, in slot order.
///
/// This struct is created by [`ObjectBooleanHashMap::iter`].
#[derive(Clone)]
pub struct Iter<'a, K> {
    inner: hash_table::Iter<'a, K>,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(inner: hash_table::Iter<'a, K>) -> Self {
        Self { inner }
    }

    /// Always fails: entries cannot be removed through a shared borrow. Use
    /// [`ObjectBooleanHashMap::cursor`] to remove while iterating.
    pub fn remove(&mut self) -> Result<()> {
        Err(MapError::UnsupportedOperation(READ_ONLY))
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = (&'a K, bool);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

/// An iterator over the keys of a map.
///
/// This struct is created by [`ObjectBooleanHashMap::keys`].
#[derive(Clone)]
pub struct Keys<'a, K> {
    inner: Iter<'a, K>,
}

impl<'a, K> Keys<'a, K> {
    pub(crate) fn new(inner: Iter<'a, K>) -> Self {
        Self { inner }
    }

    /// Always fails with [`MapError::UnsupportedOperation`].
    pub fn remove(&mut self) -> Result<()> {
        self.inner.remove()
    }
}

impl<'a, K> Iterator for Keys<'a, K> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for Keys<'_, K> {}

/// An iterator over the values of a map.
///
/// This struct is created by [`ObjectBooleanHashMap::values`].
#[derive(Clone)]
pub struct Values<'a, K> {
    inner: Iter<'a, K>,
}

impl<'a, K> Values<'a, K> {
    pub(crate) fn new(inner: Iter<'a, K>) -> Self {
        Self { inner }
    }

    /// Always fails with [`MapError::UnsupportedOperation`].
    pub fn remove(&mut self) -> Result<()> {
        self.inner.remove()
    }
}

impl<K> Iterator for Values<'_, K> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for Values<'_, K> {}

/// A removing cursor over the entries of a map.
///
/// The cursor visits every entry live when it was created, in slot order.
/// [`advance`](Self::advance) returns the next entry and
/// [`remove`](Self::remove) deletes the entry last returned. Each advance
/// permits at most one remove.
///
/// Removal leaves a tombstone and never rebuilds the table, so the entries
/// not yet visited keep their slots.
///
/// This struct is created by [`ObjectBooleanHashMap::cursor`].
///
/// # Examples
///
/// ```rust
/// use bool_hash::MapError;
/// use bool_hash::ObjectBooleanHashMap;
///
/// let mut map = ObjectBooleanHashMap::new_with_key_value("k", true);
/// let mut cursor = map.cursor();
///
/// assert!(matches!(cursor.remove(), Err(MapError::IllegalState(_))));
/// assert_eq!(cursor.advance(), Ok((&"k", true)));
/// assert_eq!(cursor.remove(), Ok(()));
/// assert!(matches!(cursor.remove(), Err(MapError::IllegalState(_))));
/// assert_eq!(cursor.advance(), Err(MapError::NoSuchElement));
/// assert!(map.is_empty());
/// ```
pub struct Cursor<'a, K, H> {
    map: &'a mut ObjectBooleanHashMap<K, H>,
    next_slot: usize,
    remaining: usize,
    last_returned: Option<usize>,
}

impl<'a, K, H> Cursor<'a, K, H>
where
    H: HashingStrategy<K>,
{
    pub(crate) fn new(map: &'a mut ObjectBooleanHashMap<K, H>) -> Self {
        let remaining = map.len();
        Self {
            map,
            next_slot: 0,
            remaining,
            last_returned: None,
        }
    }

    /// Returns `true` if [`advance`](Self::advance) will return an entry.
    pub fn has_next(&self) -> bool {
        self.remaining > 0
    }

    /// Returns the number of entries not yet visited.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Returns the next entry, or [`MapError::NoSuchElement`] once every
    /// entry has been visited.
    pub fn advance(&mut self) -> Result<(&K, bool)> {
        if self.remaining == 0 {
            return Err(MapError::NoSuchElement);
        }
        let index = self
            .map
            .table
            .next_occupied(self.next_slot)
            .ok_or(MapError::NoSuchElement)?;
        self.next_slot = index + 1;
        self.remaining -= 1;
        self.last_returned = Some(index);
        self.map.table.entry_at(index).ok_or(MapError::NoSuchElement)
    }

    /// Removes the entry last returned by [`advance`](Self::advance).
    ///
    /// Fails with [`MapError::IllegalState`] before the first advance, or
    /// when the entry was already removed.
    pub fn remove(&mut self) -> Result<()> {
        let index = self.last_returned.take().ok_or(MapError::IllegalState(
            "remove requires a preceding advance",
        ))?;
        self.map.remove_at(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ObjectBooleanHashMap<u32> {
        (0..10).map(|i| (i, i % 2 == 0)).collect()
    }

    #[test]
    fn cursor_visits_each_entry_once() {
        let mut map = sample();
        let mut cursor = map.cursor();
        let mut seen = Vec::new();
        while cursor.has_next() {
            let (key, value) = cursor.advance().unwrap();
            assert_eq!(value, key % 2 == 0);
            seen.push(*key);
        }
        assert_eq!(cursor.advance(), Err(MapError::NoSuchElement));
        assert_eq!(cursor.remaining(), 0);
        seen.sort();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn cursor_remove_requires_advance() {
        let mut map = sample();
        let mut cursor = map.cursor();
        assert_eq!(
            cursor.remove(),
            Err(MapError::IllegalState("remove requires a preceding advance"))
        );
        cursor.advance().unwrap();
        assert_eq!(cursor.remove(), Ok(()));
        assert!(matches!(cursor.remove(), Err(MapError::IllegalState(_))));
        cursor.advance().unwrap();
        assert_eq!(cursor.remove(), Ok(()));
        assert_eq!(map.len(), 8);
    }

    #[test]
    fn cursor_removal_keeps_remaining_entries_reachable() {
        let mut map = sample();
        let mut cursor = map.cursor();
        loop {
            let odd = match cursor.advance() {
                Ok((key, _)) => key % 2 == 1,
                Err(_) => break,
            };
            if odd {
                cursor.remove().unwrap();
            }
        }
        assert_eq!(map.len(), 5);
        for i in 0..10 {
            assert_eq!(map.contains_key(&i), i % 2 == 0);
        }
        assert!(map.all_satisfy(|v| v));
    }

    #[test]
    fn cursor_over_empty_map() {
        let mut map: ObjectBooleanHashMap<u32> = ObjectBooleanHashMap::new();
        let mut cursor = map.cursor();
        assert!(!cursor.has_next());
        assert_eq!(cursor.advance(), Err(MapError::NoSuchElement));
        assert!(cursor.remove().is_err());
    }

    #[test]
    fn lazy_iterators_reject_remove() {
        let map = sample();
        let mut pairs = map.iter();
        let mut keys = map.keys();
        let mut values = map.values();
        pairs.next();
        keys.next();
        values.next();
        assert_eq!(pairs.remove(), Err(MapError::UnsupportedOperation(READ_ONLY)));
        assert!(matches!(keys.remove(), Err(MapError::UnsupportedOperation(_))));
        assert!(matches!(values.remove(), Err(MapError::UnsupportedOperation(_))));
        assert_eq!(map.len(), 10);
    }

    #[test]
    fn lazy_iterators_report_exact_size() {
        let map = sample();
        let mut pairs = map.iter();
        assert_eq!(pairs.len(), 10);
        pairs.next();
        assert_eq!(pairs.len(), 9);
        assert_eq!(map.keys().len(), 10);
        assert_eq!(map.values().filter(|v| !v).count(), 5);
    }
}
