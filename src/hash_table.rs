use core::fmt::Debug;

use crate::error::MapError;
use crate::error::Result;
use crate::hash_policy;

/// Number of value bits packed into one storage word.
const WORD_BITS: usize = u64::BITS as usize;

/// State of one physical slot.
///
/// A removed key leaves a `Tombstone` rather than an `Empty` slot so that
/// probes for keys which collided with it keep searching past it.
#[derive(Clone)]
enum Slot<K> {
    Empty,
    Tombstone,
    Occupied(K),
}

impl<K> Slot<K> {
    #[inline(always)]
    fn key(&self) -> Option<&K> {
        match self {
            Slot::Occupied(key) => Some(key),
            _ => None,
        }
    }
}

/// One value bit per slot, index-aligned with the slot array. A bit is only
/// meaningful while its slot is occupied.
#[derive(Clone)]
struct ValueBits {
    words: Box<[u64]>,
}

impl ValueBits {
    fn with_slots(slots: usize) -> Self {
        Self {
            words: vec![0; slots.div_ceil(WORD_BITS)].into_boxed_slice(),
        }
    }

    #[inline(always)]
    fn get(&self, index: usize) -> bool {
        self.words[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    #[inline(always)]
    fn set(&mut self, index: usize, value: bool) {
        let word = &mut self.words[index / WORD_BITS];
        let mask = 1 << (index % WORD_BITS);
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    fn clear(&mut self) {
        self.words.fill(0);
    }
}

/// Outcome of [`SlotTable::find_slot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// The slot holding a key equal to the probed one.
    Found(usize),
    /// The key is absent; this is where it would be inserted. Either the
    /// first tombstone passed on the probe path or the empty slot that ended
    /// the probe.
    Vacant(usize),
}

/// Test and diagnostics statistics for a slot table.
#[cfg(feature = "stats")]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of live entries
    pub populated: usize,
    /// Number of tombstones awaiting the next rebuild
    pub tombstones: usize,
    /// Physical slot count
    pub capacity: usize,
    /// Entries the table accepts before growing
    pub max_populated: usize,
    /// Load factor (populated / capacity)
    pub load_factor: f64,
    /// Share of slots that are not empty, tombstones included
    pub slot_utilization: f64,
    /// Bytes held by the slot array and the value bits
    pub total_bytes: usize,
}

#[cfg(feature = "stats")]
impl DebugStats {
    /// Pretty-print the debug statistics.
    pub fn print(&self) {
        println!("=== Slot Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor, grows past {})",
            self.populated,
            self.capacity,
            self.load_factor * 100.0,
            self.max_populated
        );
        println!(
            "Slot Usage: {} live + {} tombstones ({:.2}% utilization)",
            self.populated,
            self.tombstones,
            self.slot_utilization * 100.0
        );
        println!("Total Allocated: {} bytes", self.total_bytes);
    }
}

/// Distribution of probe distances: `counts[d]` live entries sit `d` slots
/// past their home index.
#[cfg(feature = "stats")]
#[derive(Debug, Clone, Default)]
pub struct ProbeHistogram {
    /// Entry count per probe distance.
    pub counts: Vec<usize>,
}

#[cfg(feature = "stats")]
impl ProbeHistogram {
    /// Longest probe distance of any live entry.
    pub fn max_distance(&self) -> usize {
        self.counts.len().saturating_sub(1)
    }

    /// Mean probe distance over all live entries.
    pub fn mean_distance(&self) -> f64 {
        let total: usize = self.counts.iter().sum();
        if total == 0 {
            return 0.0;
        }
        let weighted: usize = self.counts.iter().enumerate().map(|(d, c)| d * c).sum();
        weighted as f64 / total as f64
    }

    /// Pretty-print the histogram.
    pub fn print(&self) {
        println!("=== Probe Distance Histogram ===");
        let total: usize = self.counts.iter().sum();
        for (distance, count) in self.counts.iter().enumerate() {
            if *count == 0 {
                continue;
            }
            let share = *count as f64 / total.max(1) as f64;
            println!(
                "{distance:>4}: {count:>8} ({:>6.2}%) {}",
                share * 100.0,
                "#".repeat((share * 60.0).ceil() as usize)
            );
        }
        println!(
            "max distance {}, mean {:.3}",
            self.max_distance(),
            self.mean_distance()
        );
    }
}

/// The physical storage of an object-to-boolean map: an open-addressed array
/// of key slots plus a packed bit-vector of values.
///
/// `SlotTable` knows nothing about how keys hash or compare. Every operation
/// that probes takes the key's strategy hash and an equality predicate, and
/// every operation that may rebuild the table takes a function rehashing
/// stored keys. Probing is linear from the home index of the
/// [`spread`](crate::hash_policy::spread) hash.
///
/// Invariants upheld after every public mutation:
///
/// - `len() <= capacity() / 2`;
/// - live entries plus tombstones stay below the capacity, so every probe
///   reaches an empty slot;
/// - capacity never shrinks.
///
/// ## Example
///
/// ```rust
/// use bool_hash::hash_table::Probe;
/// use bool_hash::hash_table::SlotTable;
///
/// let mut table: SlotTable<u32> = SlotTable::with_capacity(4);
/// let hash_of = |k: &u32| u64::from(*k);
///
/// match table.find_slot(hash_of(&7), |k| *k == 7) {
///     Probe::Vacant(index) => {
///         table.insert_at(index, 7, true);
///         table.rebalance(hash_of);
///     }
///     Probe::Found(_) => unreachable!(),
/// }
///
/// let index = table.find(hash_of(&7), |k| *k == 7).unwrap();
/// assert_eq!(table.entry_at(index), Some((&7, true)));
/// ```
#[derive(Clone)]
pub struct SlotTable<K> {
    slots: Box<[Slot<K>]>,
    values: ValueBits,
    populated: usize,
    tombstones: usize,
}

impl<K> Debug for SlotTable<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let slotmap = self
            .slots
            .chunks(16)
            .enumerate()
            .map(|(chunk, slots)| {
                slots
                    .iter()
                    .enumerate()
                    .map(|(i, slot)| match slot {
                        Slot::Empty => "..",
                        Slot::Tombstone => "xx",
                        Slot::Occupied(_) if self.values.get(chunk * 16 + i) => "T1",
                        Slot::Occupied(_) => "F0",
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>();

        f.debug_struct("SlotTable")
            .field("slots", &slotmap)
            .field("populated", &self.populated)
            .field("tombstones", &self.tombstones)
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl<K> SlotTable<K> {
    /// Creates a table able to hold `requested` entries without growing.
    ///
    /// # Panics
    ///
    /// Panics if no representable capacity holds `requested` entries; see
    /// [`try_with_capacity`](Self::try_with_capacity).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use bool_hash::hash_table::SlotTable;
    /// let table: SlotTable<String> = SlotTable::with_capacity(0);
    /// assert_eq!(table.capacity(), 16);
    ///
    /// let table: SlotTable<String> = SlotTable::with_capacity(9);
    /// assert_eq!(table.capacity(), 32);
    /// ```
    pub fn with_capacity(requested: usize) -> Self {
        match Self::try_with_capacity(requested) {
            Ok(table) => table,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a table able to hold `requested` entries without growing, or
    /// reports an [`IllegalArgument`](MapError::IllegalArgument) error if no
    /// representable capacity is large enough.
    pub fn try_with_capacity(requested: usize) -> Result<Self> {
        let capacity = hash_policy::capacity_for(requested).ok_or_else(|| {
            MapError::IllegalArgument(format!(
                "requested capacity {requested} exceeds the maximum of {}",
                hash_policy::MAX_CAPACITY / 2
            ))
        })?;
        Ok(Self::with_slots(capacity))
    }

    fn with_slots(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two() && capacity >= hash_policy::MIN_CAPACITY);
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot::Empty);
        Self {
            slots: slots.into_boxed_slice(),
            values: ValueBits::with_slots(capacity),
            populated: 0,
            tombstones: 0,
        }
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the physical slot count. Always a power of two, at least 16.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of tombstones left by removals since the last
    /// rebuild.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Probes for a key with strategy hash `hash`.
    ///
    /// Starting at the home index, slots are visited in linear order.
    /// Tombstones never end the search; the first one passed is remembered
    /// as the insertion point. The search ends at an occupied slot whose key
    /// satisfies `eq`, or at an empty slot.
    pub fn find_slot(&self, hash: u64, eq: impl Fn(&K) -> bool) -> Probe {
        let capacity = self.capacity();
        let mut index = hash_policy::index_for(hash_policy::spread(hash), capacity);
        let mut first_tombstone = None;

        loop {
            match &self.slots[index] {
                Slot::Empty => return Probe::Vacant(first_tombstone.unwrap_or(index)),
                Slot::Tombstone => {
                    first_tombstone.get_or_insert(index);
                }
                Slot::Occupied(key) => {
                    if eq(key) {
                        return Probe::Found(index);
                    }
                }
            }
            index = hash_policy::probe_next(index, capacity);
        }
    }

    /// Returns the slot index of the key matching `eq`, if present.
    pub fn find(&self, hash: u64, eq: impl Fn(&K) -> bool) -> Option<usize> {
        match self.find_slot(hash, eq) {
            Probe::Found(index) => Some(index),
            Probe::Vacant(_) => None,
        }
    }

    /// Returns the key and value stored at `index`, or `None` if the slot is
    /// not occupied.
    #[inline]
    pub fn entry_at(&self, index: usize) -> Option<(&K, bool)> {
        self.slots
            .get(index)?
            .key()
            .map(|key| (key, self.values.get(index)))
    }

    /// Overwrites the value of the occupied slot at `index`, returning the
    /// previous value.
    pub fn replace_value(&mut self, index: usize, value: bool) -> bool {
        debug_assert!(matches!(self.slots[index], Slot::Occupied(_)));
        let previous = self.values.get(index);
        self.values.set(index, value);
        previous
    }

    /// Stores a new entry at a free slot previously returned as
    /// [`Probe::Vacant`].
    ///
    /// Callers must follow up with [`rebalance`](Self::rebalance) before the
    /// next probe.
    pub fn insert_at(&mut self, index: usize, key: K, value: bool) {
        match self.slots[index] {
            Slot::Empty => {}
            Slot::Tombstone => self.tombstones -= 1,
            Slot::Occupied(_) => panic!("slot {index} is already occupied"),
        }
        self.slots[index] = Slot::Occupied(key);
        self.values.set(index, value);
        self.populated += 1;
    }

    /// Removes the entry at `index`, leaving a tombstone, and returns it.
    /// Returns `None` if the slot is not occupied.
    pub fn tombstone_at(&mut self, index: usize) -> Option<(K, bool)> {
        if !matches!(self.slots.get(index), Some(Slot::Occupied(_))) {
            return None;
        }
        let Slot::Occupied(key) = core::mem::replace(&mut self.slots[index], Slot::Tombstone)
        else {
            unreachable!()
        };
        let value = self.values.get(index);
        self.values.set(index, false);
        self.populated -= 1;
        self.tombstones += 1;
        Some((key, value))
    }

    /// Restores the table invariants after an insertion.
    ///
    /// Doubles the capacity while more than half the slots are live. If the
    /// table did not grow but live entries and tombstones together leave too
    /// few empty slots, rebuilds it at the same capacity.
    pub fn rebalance(&mut self, hasher: impl Fn(&K) -> u64) {
        let capacity = self.capacity();
        if hash_policy::growth_trigger(self.populated, capacity) {
            self.rehash(
                hash_policy::grown_capacity(self.populated, capacity),
                hasher,
            );
        } else if self.populated + self.tombstones > hash_policy::max_occupied(capacity) {
            tracing::trace!(
                capacity,
                populated = self.populated,
                tombstones = self.tombstones,
                "purging tombstones"
            );
            self.rehash(capacity, hasher);
        }
    }

    /// Rebuilds the table with `capacity` slots.
    ///
    /// Walks the old slots once and re-inserts every live entry; tombstones
    /// are dropped. `capacity` is raised to the current capacity if smaller,
    /// so the table never shrinks.
    pub fn rehash(&mut self, capacity: usize, hasher: impl Fn(&K) -> u64) {
        let capacity = capacity
            .max(self.capacity())
            .checked_next_power_of_two()
            .expect("slot table capacity overflow");
        tracing::debug!(
            from = self.capacity(),
            to = capacity,
            populated = self.populated,
            tombstones = self.tombstones,
            "rehashing slot table"
        );

        let old = core::mem::replace(self, Self::with_slots(capacity));
        let old_values = old.values;
        for (index, slot) in old.slots.into_vec().into_iter().enumerate() {
            if let Slot::Occupied(key) = slot {
                let value = old_values.get(index);
                match self.find_slot(hasher(&key), |_| false) {
                    Probe::Vacant(target) => self.insert_at(target, key, value),
                    Probe::Found(_) => unreachable!(),
                }
            }
        }
        debug_assert_eq!(self.populated, old.populated);
    }

    /// Empties every slot and resets the size. The capacity is kept.
    pub fn clear(&mut self) {
        self.slots.fill_with(|| Slot::Empty);
        self.values.clear();
        self.populated = 0;
        self.tombstones = 0;
    }

    /// Returns the index of the first occupied slot at or after `start`.
    #[inline]
    pub fn next_occupied(&self, start: usize) -> Option<usize> {
        self.slots
            .get(start..)?
            .iter()
            .position(|slot| matches!(slot, Slot::Occupied(_)))
            .map(|offset| start + offset)
    }

    /// Returns an iterator over `(index, key, value)` for every live entry,
    /// in slot order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            table: self,
            slot_index: 0,
            remaining: self.populated,
        }
    }

    /// Computes the probe distance histogram, given the function used to hash
    /// stored keys.
    #[cfg(feature = "stats")]
    pub fn probe_histogram(&self, hasher: impl Fn(&K) -> u64) -> ProbeHistogram {
        let capacity = self.capacity();
        let mut counts = Vec::new();
        for (index, key, _) in self.iter() {
            let home = hash_policy::index_for(hash_policy::spread(hasher(key)), capacity);
            let distance = index.wrapping_sub(home) & (capacity - 1);
            if counts.len() <= distance {
                counts.resize(distance + 1, 0);
            }
            counts[distance] += 1;
        }
        ProbeHistogram { counts }
    }

    /// Returns a snapshot of table statistics.
    #[cfg(feature = "stats")]
    pub fn debug_stats(&self) -> DebugStats {
        let capacity = self.capacity();
        DebugStats {
            populated: self.populated,
            tombstones: self.tombstones,
            capacity,
            max_populated: capacity / 2,
            load_factor: self.populated as f64 / capacity as f64,
            slot_utilization: (self.populated + self.tombstones) as f64 / capacity as f64,
            total_bytes: capacity * core::mem::size_of::<Slot<K>>()
                + self.values.words.len() * core::mem::size_of::<u64>(),
        }
    }
}

/// An iterator over the live entries of a [`SlotTable`], yielding
/// `(slot index, &key, value)` in slot order.
///
/// This struct is created by [`SlotTable::iter`].
pub struct Iter<'a, K> {
    table: &'a SlotTable<K>,
    slot_index: usize,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = (usize, &'a K, bool);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.table.next_occupied(self.slot_index)?;
        self.slot_index = index + 1;
        self.remaining -= 1;
        let (key, value) = self.table.entry_at(index)?;
        Some((index, key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            slot_index: self.slot_index,
            remaining: self.remaining,
        }
    }
}
