use core::fmt::Display;
use core::fmt::Write;

use crate::error::MapError;
use crate::error::Result;
use crate::hash_map::ObjectBooleanHashMap;
use crate::iter::Cursor;
use crate::iter::Values;
use crate::strategy::HashingStrategy;

const VALUE_ONLY: &str = "a values collection cannot add a value without a key";

/// A live view of the values of an [`ObjectBooleanHashMap`].
///
/// The view holds one value per entry, so `true` and `false` may each occur
/// many times. Removing a value deletes an entry carrying it from the backing
/// map. Values cannot be added, since there is no key to attach them to.
///
/// This struct is created by [`ObjectBooleanHashMap::values_collection`].
///
/// # Examples
///
/// ```rust
/// use bool_hash::ObjectBooleanHashMap;
///
/// let mut map = ObjectBooleanHashMap::from([(1, true), (2, true), (3, false)]);
/// let mut values = map.values_collection();
/// assert!(values.remove(true));
/// assert_eq!(values.len(), 2);
/// assert!(values.with(true).is_err());
///
/// assert_eq!(map.count(|v| v), 1);
/// ```
pub struct ValuesCollection<'a, K, H> {
    map: &'a mut ObjectBooleanHashMap<K, H>,
}

/// Which of the two boolean values a collection of values mentions.
#[derive(Default, Clone, Copy)]
struct Membership {
    has_true: bool,
    has_false: bool,
}

impl Membership {
    fn of(values: impl IntoIterator<Item = bool>) -> Self {
        values.into_iter().fold(Self::default(), |mut seen, value| {
            if value {
                seen.has_true = true;
            } else {
                seen.has_false = true;
            }
            seen
        })
    }

    fn contains(self, value: bool) -> bool {
        if value { self.has_true } else { self.has_false }
    }
}

impl<'a, K, H> ValuesCollection<'a, K, H>
where
    H: HashingStrategy<K>,
{
    pub(crate) fn new(map: &'a mut ObjectBooleanHashMap<K, H>) -> Self {
        Self { map }
    }

    /// Returns the number of values, one per entry of the backing map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the backing map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns `true` if some entry maps to `value`.
    pub fn contains(&self, value: bool) -> bool {
        self.map.contains_value(value)
    }

    /// Returns `true` if every value in `values` occurs in the backing map.
    pub fn contains_all(&self, values: impl IntoIterator<Item = bool>) -> bool {
        values.into_iter().all(|value| self.contains(value))
    }

    /// Returns an iterator over the values.
    pub fn iter(&self) -> Values<'_, K> {
        self.map.values()
    }

    /// Returns a cursor over the values that removes entries from the backing
    /// map.
    pub fn cursor(&mut self) -> ValuesCursor<'_, K, H> {
        ValuesCursor {
            inner: self.map.cursor(),
        }
    }

    /// Always fails with [`MapError::UnsupportedOperation`].
    pub fn add(&mut self, _value: bool) -> Result<bool> {
        Err(MapError::UnsupportedOperation(VALUE_ONLY))
    }

    /// Always fails with [`MapError::UnsupportedOperation`].
    pub fn add_all(&mut self, _values: impl IntoIterator<Item = bool>) -> Result<bool> {
        Err(MapError::UnsupportedOperation(VALUE_ONLY))
    }

    /// Always fails with [`MapError::UnsupportedOperation`].
    pub fn with(&mut self, _value: bool) -> Result<&mut Self> {
        Err(MapError::UnsupportedOperation(VALUE_ONLY))
    }

    /// Always fails with [`MapError::UnsupportedOperation`].
    pub fn without(&mut self, _value: bool) -> Result<&mut Self> {
        Err(MapError::UnsupportedOperation(
            "a values collection cannot choose which entry to remove fluently",
        ))
    }

    /// Removes one entry mapped to `value`. Which entry is unspecified.
    /// Returns `true` if such an entry existed.
    pub fn remove(&mut self, value: bool) -> bool {
        let found = self
            .map
            .table
            .iter()
            .find(|(_, _, v)| *v == value)
            .map(|(index, _, _)| index);
        found
            .and_then(|index| self.map.remove_at(index))
            .is_some()
    }

    /// Removes every entry whose value occurs in `values`. Returns `true` if
    /// anything was removed.
    pub fn remove_all(&mut self, values: impl IntoIterator<Item = bool>) -> bool {
        let doomed = Membership::of(values);
        self.map.remove_if(|_, value| doomed.contains(value))
    }

    /// Keeps only the entries whose value occurs in `values`. Returns `true`
    /// if anything was removed.
    pub fn retain_all(&mut self, values: impl IntoIterator<Item = bool>) -> bool {
        let kept = Membership::of(values);
        self.map.remove_if(|_, value| !kept.contains(value))
    }

    /// Removes every entry from the backing map.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Renders the values joined by `separator`.
    pub fn make_string(&self, separator: &str) -> String {
        self.make_string_with("", separator, "")
    }

    /// Renders the values joined by `separator`, between `start` and `end`.
    pub fn make_string_with(&self, start: &str, separator: &str, end: &str) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_values(&mut out, self.iter(), start, separator, end);
        out
    }
}

fn write_values(
    out: &mut impl Write,
    values: impl Iterator<Item = bool>,
    start: &str,
    separator: &str,
    end: &str,
) -> core::fmt::Result {
    out.write_str(start)?;
    for (i, value) in values.enumerate() {
        if i > 0 {
            out.write_str(separator)?;
        }
        write!(out, "{value}")?;
    }
    out.write_str(end)
}

/// Renders the values as `[v, v]`. Use
/// [`make_string`](ValuesCollection::make_string) for the bare
/// `value, value` form.
impl<K, H> Display for ValuesCollection<'_, K, H>
where
    H: HashingStrategy<K>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write_values(f, self.iter(), "[", ", ", "]")
    }
}

impl<'s, K, H> IntoIterator for &'s ValuesCollection<'_, K, H>
where
    H: HashingStrategy<K>,
{
    type Item = bool;
    type IntoIter = Values<'s, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A removing cursor over the values of a map.
///
/// Behaves like [`Cursor`], yielding only values.
///
/// This struct is created by [`ValuesCollection::cursor`].
pub struct ValuesCursor<'a, K, H> {
    inner: Cursor<'a, K, H>,
}

impl<K, H> ValuesCursor<'_, K, H>
where
    H: HashingStrategy<K>,
{
    /// Returns `true` if [`advance`](Self::advance) will return a value.
    pub fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    /// Returns the next value, or [`MapError::NoSuchElement`] once exhausted.
    pub fn advance(&mut self) -> Result<bool> {
        self.inner.advance().map(|(_, value)| value)
    }

    /// Removes the entry whose value was last returned.
    pub fn remove(&mut self) -> Result<()> {
        self.inner.remove()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ObjectBooleanHashMap<u32> {
        (0..9).map(|i| (i, i % 3 == 0)).collect()
    }

    #[test]
    fn values_read_through() {
        let mut map = sample();
        let values = map.values_collection();
        assert_eq!(values.len(), 9);
        assert!(values.contains(true));
        assert!(values.contains(false));
        assert!(values.contains_all([true, false]));
        assert_eq!(values.iter().filter(|v| *v).count(), 3);
        assert_eq!((&values).into_iter().count(), 9);

        let mut all_false: ObjectBooleanHashMap<u32> = (0..3).map(|i| (i, false)).collect();
        let values = all_false.values_collection();
        assert!(!values.contains(true));
        assert!(!values.contains_all([false, true]));
        assert_eq!(values.make_string("|"), "false|false|false");
        assert_eq!(values.to_string(), "[false, false, false]");
        assert_eq!(values.make_string(", "), "false, false, false");
    }

    #[test]
    fn values_reject_additions() {
        let mut map = sample();
        let mut values = map.values_collection();
        assert_eq!(values.add(true), Err(MapError::UnsupportedOperation(VALUE_ONLY)));
        assert!(values.add_all([true, false]).is_err());
        assert!(values.with(false).is_err());
        assert!(matches!(
            values.without(false),
            Err(MapError::UnsupportedOperation(_))
        ));
        assert_eq!(map.len(), 9);
    }

    #[test]
    fn values_remove_deletes_one_entry() {
        let mut map = sample();
        assert!(map.values_collection().remove(true));
        assert_eq!(map.len(), 8);
        assert_eq!(map.count(|v| v), 2);
        assert_eq!(map.count(|v| !v), 6);

        assert!(map.values_collection().remove(true));
        assert!(map.values_collection().remove(true));
        assert!(!map.values_collection().remove(true));
        assert_eq!(map.len(), 6);
    }

    #[test]
    fn values_remove_all_and_retain_all() {
        let mut map = sample();
        assert!(map.values_collection().remove_all([true]));
        assert_eq!(map.len(), 6);
        assert!(!map.values_collection().remove_all([true]));
        assert!(!map.values_collection().remove_all(Vec::new()));

        assert!(!map.values_collection().retain_all([false, true]));
        assert_eq!(map.len(), 6);
        assert!(map.values_collection().retain_all([true]));
        assert!(map.is_empty());
    }

    #[test]
    fn values_cursor_enforces_single_removal() {
        let mut map = sample();
        {
            let mut values = map.values_collection();
            let mut cursor = values.cursor();
            assert!(matches!(cursor.remove(), Err(MapError::IllegalState(_))));
            while cursor.has_next() {
                if cursor.advance().unwrap() {
                    cursor.remove().unwrap();
                    assert!(matches!(cursor.remove(), Err(MapError::IllegalState(_))));
                }
            }
            assert_eq!(cursor.advance(), Err(MapError::NoSuchElement));
        }
        assert_eq!(map.len(), 6);
        assert!(!map.contains_value(true));
    }

    #[test]
    fn values_clear_empties_the_map() {
        let mut map = sample();
        let mut values = map.values_collection();
        values.clear();
        assert!(values.is_empty());
        assert_eq!(values.to_string(), "[]");
        assert!(map.is_empty());
    }
}
