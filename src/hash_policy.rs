//! Hash spreading, probe sequencing and capacity arithmetic.
//!
//! Capacities are always powers of two no smaller than [`MIN_CAPACITY`], so
//! home indices and probe steps reduce to masking.

/// Smallest physical slot count of any table.
pub const MIN_CAPACITY: usize = 16;

/// Largest physical slot count a table may reach.
pub const MAX_CAPACITY: usize = 1 << (usize::BITS - 2);

/// Mixes a strategy hash so that hashes differing only in their high bits
/// still land on different home indices.
///
/// This is the 64-bit finalizer of MurmurHash3.
#[inline(always)]
pub fn spread(hash: u64) -> u64 {
    let mut h = hash;
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    h ^= h >> 33;
    h
}

/// Home index of a spread hash.
#[inline(always)]
pub fn index_for(spread: u64, capacity: usize) -> usize {
    debug_assert!(capacity.is_power_of_two());
    (spread as usize) & (capacity - 1)
}

/// Linear probing: the slot after `index`, wrapping at `capacity`.
#[inline(always)]
pub fn probe_next(index: usize, capacity: usize) -> usize {
    (index + 1) & (capacity - 1)
}

/// Smallest capacity that holds `requested` entries at a load of one half.
///
/// Returns `None` if that capacity would exceed [`MAX_CAPACITY`].
pub fn capacity_for(requested: usize) -> Option<usize> {
    let capacity = requested
        .checked_mul(2)?
        .max(MIN_CAPACITY)
        .checked_next_power_of_two()?;
    (capacity <= MAX_CAPACITY).then_some(capacity)
}

/// `true` once the live entries exceed half the slots.
#[inline(always)]
pub fn growth_trigger(len: usize, capacity: usize) -> bool {
    len > capacity / 2
}

/// Capacity after growth: `capacity` doubled until `len` fits at half load.
pub fn grown_capacity(len: usize, capacity: usize) -> usize {
    let mut capacity = capacity.max(MIN_CAPACITY);
    while growth_trigger(len, capacity) {
        capacity = capacity
            .checked_mul(2)
            .filter(|&c| c <= MAX_CAPACITY)
            .expect("slot table capacity overflow");
    }
    capacity
}

/// Number of non-empty slots (live plus tombstones) past which the table is
/// rebuilt in place to discard tombstones.
#[inline(always)]
pub fn max_occupied(capacity: usize) -> usize {
    capacity - capacity / 4
}
