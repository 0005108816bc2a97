// End-to-end behaviour of the object-to-boolean map through its public API.
//
// Covers the documented scenarios: removal of one of three keys, growth at
// the ninth entry, collisions surviving removals, the None key, supplier
// exactly-once semantics, cursor misuse, idempotent clear, and the adapter
// and view contracts.
use std::cell::Cell;

use bool_hash::HashingStrategy;
use bool_hash::MapError;
use bool_hash::ObjectBooleanHashMap;
use bool_hash::ObjectBooleanMap;

/// Every key hashes to the same value.
struct Constant;

impl HashingStrategy<String> for Constant {
    fn hash_code(&self, _key: &String) -> u64 {
        7
    }

    fn equals(&self, a: &String, b: &String) -> bool {
        a == b
    }
}

/// Treats `None` and the empty string as the same key.
struct EmptyIsNone;

impl HashingStrategy<Option<&'static str>> for EmptyIsNone {
    fn hash_code(&self, key: &Option<&'static str>) -> u64 {
        key.map_or(0, |s| s.len() as u64)
    }

    fn equals(&self, a: &Option<&'static str>, b: &Option<&'static str>) -> bool {
        a.unwrap_or("") == b.unwrap_or("")
    }
}

// Test: removing one of three keys.
// Verifies: size drops by one and the map equals a map built from the rest.
#[test]
fn remove_one_of_three() {
    let mut map = ObjectBooleanHashMap::new();
    map.put("0".to_string(), true);
    map.put("1".to_string(), true);
    map.put("2".to_string(), false);
    map.remove_key(&"1".to_string());

    assert_eq!(map.len(), 2);
    let expected = ObjectBooleanHashMap::from([("0".to_string(), true), ("2".to_string(), false)]);
    assert_eq!(map, expected);
    assert!(map.content_equals(&expected.as_unmodifiable()));
}

// Test: growth snapshot.
// Verifies: capacity is 16 while eight entries fit at half load and 32
// after the ninth; all mappings survive the rehash.
#[test]
fn ninth_entry_doubles_capacity() {
    let mut map = ObjectBooleanHashMap::new();
    for i in 0..8u32 {
        map.put(i, i % 2 == 0);
    }
    assert_eq!(map.capacity(), 16);
    map.put(8, true);
    assert_eq!(map.capacity(), 32);
    assert_eq!(map.len(), 9);
    for i in 0..8u32 {
        assert_eq!(map.get(&i), Some(i % 2 == 0));
    }
    assert_eq!(map.get(&8), Some(true));
}

// Test: collision survival.
// Verifies: with every key colliding, removing a middle key keeps the
// others reachable and a new key reuses the freed slot.
#[test]
fn colliding_keys_survive_interleaved_removal() {
    let mut map = ObjectBooleanHashMap::with_hashing_strategy(Constant);
    let [a, b, c, d] = ["a", "b", "c", "d"].map(String::from);
    map.put(a.clone(), true);
    map.put(b.clone(), false);
    map.put(c.clone(), true);
    map.remove_key(&b);
    map.put(d.clone(), false);

    assert_eq!(map.get(&a), Some(true));
    assert_eq!(map.get(&c), Some(true));
    assert_eq!(map.get(&d), Some(false));
    assert_eq!(map.get(&b), None);
    assert_eq!(map.len(), 3);

    map.put(b.clone(), true);
    assert_eq!(map.get(&b), Some(true));
    assert_eq!(map.len(), 4);
}

// Test: None key behaves like any other key, including under a custom
// strategy that must handle it.
#[test]
fn none_key_round_trip() {
    let mut map: ObjectBooleanHashMap<Option<&str>> = ObjectBooleanHashMap::new();
    map.put(None, true);
    assert_eq!(map.get(&None), Some(true));
    assert!(map.contains_key(&None));
    map.remove_key(&None);
    assert!(!map.contains_key(&None));
    assert_eq!(map.get(&None), None);

    let mut custom = ObjectBooleanHashMap::with_hashing_strategy(EmptyIsNone);
    custom.put(None, true);
    assert_eq!(custom.put(Some(""), false), Some(true));
    assert_eq!(custom.len(), 1);
    assert_eq!(custom.get(&None), Some(false));
}

// Test: get_if_absent_put exactly-once contract.
#[test]
fn supplier_runs_exactly_once() {
    let mut map = ObjectBooleanHashMap::new();
    let calls = Cell::new(0);
    let supplier = |value: bool| {
        calls.set(calls.get() + 1);
        value
    };

    assert!(map.get_if_absent_put_with("key", || supplier(true)));
    assert!(map.get_if_absent_put_with("key", || supplier(false)));
    assert!(map.get_if_absent_put_with_key("key", |_| supplier(false)));
    assert_eq!(calls.get(), 1);
    assert_eq!(map.get(&"key"), Some(true));
}

// Test: cursor misuse.
// Verifies: remove before advance and a second remove both report an
// invalid state; advancing past the end reports no such element.
#[test]
fn cursor_misuse_is_reported() {
    let mut map = ObjectBooleanHashMap::from([("x", true), ("y", false)]);
    let mut cursor = map.cursor();
    assert!(matches!(cursor.remove(), Err(MapError::IllegalState(_))));
    assert!(cursor.advance().is_ok());
    assert_eq!(cursor.remove(), Ok(()));
    assert!(matches!(cursor.remove(), Err(MapError::IllegalState(_))));
    assert!(cursor.advance().is_ok());
    assert_eq!(cursor.advance(), Err(MapError::NoSuchElement));
    assert_eq!(map.len(), 1);
}

// Test: removal of an absent key is a no-op.
#[test]
fn removing_absent_key_changes_nothing() {
    let mut map = ObjectBooleanHashMap::new_with_key_value(1u8, true);
    map.remove_key(&2);
    assert_eq!(map.len(), 1);
    assert!(!map.get_if_absent(&2, false));
    assert!(map.remove_key_if_absent(&2, true));
    assert_eq!(map.len(), 1);
}

// Test: clear is idempotent and leaves an empty, usable map.
#[test]
fn clear_twice() {
    let mut map: ObjectBooleanHashMap<u32> = (0..100).map(|i| (i, true)).collect();
    map.clear();
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map, ObjectBooleanHashMap::new());
    map.put(5, false);
    assert_eq!(map.len(), 1);
}

// Test: an exhausted read-only iterator never removes.
#[test]
fn lazy_iterators_reject_remove() {
    let map = ObjectBooleanHashMap::from([(1, true)]);
    let mut iter = map.iter();
    assert!(iter.next().is_some());
    assert!(matches!(iter.remove(), Err(MapError::UnsupportedOperation(_))));
    assert!(matches!(map.keys().remove(), Err(MapError::UnsupportedOperation(_))));
    assert!(matches!(map.values().remove(), Err(MapError::UnsupportedOperation(_))));
}

// Test: views write through and reject additions.
#[test]
fn views_write_through() {
    let mut map: ObjectBooleanHashMap<u32> = (0..10).map(|i| (i, i < 3)).collect();

    assert!(map.key_set().add(11).is_err());
    assert!(map.key_set().remove(&9));
    assert!(map.values_collection().add(true).is_err());
    assert!(map.values_collection().remove(true));
    assert_eq!(map.len(), 8);
    assert_eq!(map.count(|v| v), 2);

    assert!(map.values_collection().retain_all([false]));
    assert_eq!(map.len(), 6);
    assert!(map.key_set().retain(|k| *k >= 5));
    assert_eq!(map.len(), 4);
}

// Test: the read-only view is idempotent and rejects every mutator.
#[test]
fn unmodifiable_view_contract() {
    let map = ObjectBooleanHashMap::from([("a", true)]);
    let mut view = map.as_unmodifiable();
    let twice = view.as_unmodifiable();
    assert!(std::ptr::eq(view.delegate(), twice.delegate()));

    assert!(matches!(view.put("b", true), Err(MapError::UnsupportedOperation(_))));
    assert!(view.clear().is_err());
    assert!(view.remove_key(&"a").is_err());
    assert_eq!(view.get_if_absent_put("a", false), Ok(true));
    assert!(view.get_if_absent_put("b", false).is_err());
    assert_eq!(map.len(), 1);
}

// Test: capacity requests.
#[test]
fn capacity_requests() {
    assert_eq!(ObjectBooleanHashMap::<u8>::with_capacity(100).capacity(), 256);
    assert!(matches!(
        ObjectBooleanHashMap::<u8>::try_with_capacity(usize::MAX),
        Err(MapError::IllegalArgument(_))
    ));
}

// Test: churn with removals and reinsertions never exhausts empty slots.
#[test]
fn heavy_churn_keeps_lookups_working() {
    let mut map = ObjectBooleanHashMap::new();
    for round in 0..200u64 {
        for i in 0..6u64 {
            map.put(round * 10 + i, i % 2 == 0);
        }
        for i in 0..6u64 {
            map.remove_key(&(round * 10 + i));
        }
        assert!(map.is_empty());
        assert_eq!(map.get(&(round * 10)), None);
    }
    assert_eq!(map.capacity(), 16);
}

#[cfg(feature = "sync")]
#[test]
fn synchronized_adapter_matches_plain_map() {
    let sync = ObjectBooleanHashMap::from([(1, true), (2, false)]).as_synchronized();
    sync.put(3, true);
    sync.remove_key(&1);
    let plain = ObjectBooleanHashMap::from([(2, false), (3, true)]);
    assert!(sync.content_equals(&plain));
    assert_eq!(sync.into_inner(), plain);
}
