// Property tests checking the map against std::collections::HashMap.
//
// Property 1: any sequence of put / remove / get_if_absent_put / update /
//  clear leaves the map equal to the model, with len <= capacity / 2 and a
//  capacity that never shrinks.
// Property 2: a cursor pass that removes entries matching a predicate leaves
//  exactly the entries the model's retain keeps.
// Property 3: equal contents give equal hashes regardless of insertion order
//  or removal history.
use std::collections::HashMap;
use std::hash::Hash;
use std::hash::Hasher;

use bool_hash::ObjectBooleanHashMap;
use proptest::prelude::*;
use siphasher::sip::SipHasher;

#[derive(Debug, Clone)]
enum Op {
    Put(u16, bool),
    Remove(u16),
    GetIfAbsentPut(u16, bool),
    Update(u16, bool),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0u16..300, any::<bool>()).prop_map(|(k, v)| Op::Put(k, v)),
        4 => (0u16..300).prop_map(Op::Remove),
        2 => (0u16..300, any::<bool>()).prop_map(|(k, v)| Op::GetIfAbsentPut(k, v)),
        2 => (0u16..300, any::<bool>()).prop_map(|(k, v)| Op::Update(k, v)),
        1 => Just(Op::Clear),
    ]
}

fn digest<T: Hash>(value: &T) -> u64 {
    let mut hasher = SipHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

proptest! {
    #[test]
    fn prop_matches_std_model(ops in proptest::collection::vec(op(), 1..400)) {
        let mut map: ObjectBooleanHashMap<u16> = ObjectBooleanHashMap::new();
        let mut model: HashMap<u16, bool> = HashMap::new();
        let mut last_capacity = map.capacity();

        for op in ops {
            match op {
                Op::Put(k, v) => {
                    prop_assert_eq!(map.put(k, v), model.insert(k, v));
                }
                Op::Remove(k) => {
                    prop_assert_eq!(map.remove(&k), model.remove(&k));
                }
                Op::GetIfAbsentPut(k, v) => {
                    let expected = *model.entry(k).or_insert(v);
                    prop_assert_eq!(map.get_if_absent_put(k, v), expected);
                }
                Op::Update(k, if_absent) => {
                    let slot = model.entry(k).or_insert(if_absent);
                    *slot = !*slot;
                    prop_assert_eq!(map.update_value(k, if_absent, |v| !v), *slot);
                }
                Op::Clear => {
                    map.clear();
                    model.clear();
                }
            }

            prop_assert_eq!(map.len(), model.len());
            prop_assert!(map.len() <= map.capacity() / 2);
            prop_assert!(map.capacity() >= last_capacity);
            last_capacity = map.capacity();
        }

        for (k, v) in &model {
            prop_assert_eq!(map.get(k), Some(*v));
        }
        for (k, v) in map.iter() {
            prop_assert_eq!(model.get(k), Some(&v));
        }
        prop_assert_eq!(map.contains_value(true), model.values().any(|v| *v));
        prop_assert_eq!(map.contains_value(false), model.values().any(|v| !*v));
    }

    #[test]
    fn prop_cursor_removal_matches_retain(
        entries in proptest::collection::hash_map(0u32..1000, any::<bool>(), 0..200),
        modulus in 1u32..7,
    ) {
        let mut map: ObjectBooleanHashMap<u32> =
            entries.iter().map(|(k, v)| (*k, *v)).collect();
        let mut model = entries.clone();

        let mut cursor = map.cursor();
        let mut visited = 0;
        loop {
            let doomed = match cursor.advance() {
                Ok((key, value)) => value && key % modulus == 0,
                Err(_) => break,
            };
            visited += 1;
            if doomed {
                prop_assert!(cursor.remove().is_ok());
                prop_assert!(cursor.remove().is_err());
            }
        }
        prop_assert_eq!(visited, entries.len());
        model.retain(|k, v| !(*v && k % modulus == 0));

        prop_assert_eq!(map.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(map.get(k), Some(*v));
        }
    }

    #[test]
    fn prop_hash_ignores_history(
        entries in proptest::collection::hash_map(any::<u32>(), any::<bool>(), 0..100),
        noise in proptest::collection::vec(any::<u32>(), 0..50),
    ) {
        let forward: ObjectBooleanHashMap<u32> =
            entries.iter().map(|(k, v)| (*k, *v)).collect();

        let mut shuffled = ObjectBooleanHashMap::with_capacity(entries.len() * 3);
        for k in &noise {
            shuffled.put(*k, true);
        }
        let mut sorted: Vec<_> = entries.iter().collect();
        sorted.sort();
        for (k, v) in sorted.into_iter().rev() {
            shuffled.put(*k, *v);
        }
        for k in &noise {
            if !entries.contains_key(k) {
                shuffled.remove_key(k);
            }
        }

        prop_assert_eq!(&forward, &shuffled);
        prop_assert_eq!(digest(&forward), digest(&shuffled));
    }
}
