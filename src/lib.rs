#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

/// Errors reported by fallible map operations.
pub mod error;

pub mod hash_policy;

/// Open-addressed slot storage with a packed value bit-vector.
pub mod hash_table;

/// The mutable object-to-boolean hash map.
///
/// This module provides [`ObjectBooleanHashMap`], which wraps a
/// [`SlotTable`](hash_table::SlotTable) and places keys with a
/// [`HashingStrategy`].
pub mod hash_map;

pub mod iter;

/// The live key view of a map.
pub mod key_set;

/// Read access shared by every map flavour.
pub mod map;

/// Pluggable hashing and equality for keys.
pub mod strategy;

/// The live value view of a map.
pub mod values;

/// A borrowed read-only view of a map.
pub mod unmodifiable;

/// Shared immutable snapshots of a map.
pub mod immutable;

/// A map guarded by a single lock.
#[cfg(feature = "sync")]
pub mod synchronized;

pub use error::MapError;
pub use error::Result;
pub use hash_map::ObjectBooleanHashMap;
pub use immutable::ImmutableObjectBooleanMap;
pub use iter::Cursor;
pub use key_set::KeySet;
pub use map::ObjectBooleanMap;
pub use strategy::DefaultHashBuilder;
pub use strategy::HashingStrategy;
pub use strategy::NativeHashing;
#[cfg(feature = "sync")]
pub use synchronized::SynchronizedObjectBooleanMap;
pub use unmodifiable::UnmodifiableObjectBooleanMap;
pub use values::ValuesCollection;
