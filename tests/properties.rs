// ProbingHashTable property tests against std's HashMap as a model.
//
// Property 1: every operation agrees with the model.
//  - Operations: insert, get, remove, contains_key, clear.
//  - Invariant after each step: len() == model.len(), the key snapshot has
//    no duplicates and matches the model's key set, and every model key is
//    retrievable with its latest value.
//
// Property 2: absent removals are no-ops.
//  - Removing a key never inserted leaves len() and modification_count()
//    unchanged.
//
// Property 3: growth keeps entries.
//  - Whenever an insert grows the table, the capacity exactly doubles and all
//    previously inserted keys keep their values.
use std::collections::BTreeSet;
use std::collections::HashMap;

use proptest::prelude::*;
use quadprobe::ProbingHashTable;
use quadprobe::TableConfig;

fn small_table(load_factor: f64) -> ProbingHashTable<u16, u32> {
    ProbingHashTable::with_config(TableConfig::default().with_load_factor(load_factor))
        .expect("valid config")
}

proptest! {
    #[test]
    fn prop_matches_model(
        load_factor in prop_oneof![Just(0.45), Just(0.75), Just(1.0), Just(1.5)],
        ops in proptest::collection::vec((0u8..=4u8, 0u16..64u16, any::<u32>()), 1..300),
    ) {
        let mut table = small_table(load_factor);
        let mut model: HashMap<u16, u32> = HashMap::new();

        for (op, key, value) in ops {
            match op {
                0 | 1 => {
                    prop_assert_eq!(table.insert(key, value), model.insert(key, value));
                }
                2 => {
                    prop_assert_eq!(table.get(&key), model.get(&key));
                }
                3 => {
                    prop_assert_eq!(table.remove(&key), model.remove(&key));
                }
                4 => {
                    if value % 16 == 0 {
                        table.clear();
                        model.clear();
                    } else {
                        prop_assert_eq!(table.contains_key(&key), model.contains_key(&key));
                    }
                }
                _ => unreachable!(),
            }

            prop_assert_eq!(table.len(), model.len());
            prop_assert!(table.len() <= table.used_buckets());
            prop_assert!(table.used_buckets() <= table.capacity());
            prop_assert!(table.capacity().is_power_of_two());
        }

        let keys = table.keys();
        let unique: BTreeSet<u16> = keys.iter().copied().collect();
        prop_assert_eq!(unique.len(), keys.len());
        prop_assert_eq!(unique, model.keys().copied().collect::<BTreeSet<u16>>());

        for (key, value) in &model {
            prop_assert_eq!(table.get(key), Some(value));
        }
    }

    #[test]
    fn prop_absent_removal_is_noop(
        keys in proptest::collection::vec(0u16..1000u16, 0..100),
        absent in 1000u16..2000u16,
    ) {
        let mut table = small_table(0.45);
        for key in &keys {
            table.insert(*key, u32::from(*key));
        }
        let len = table.len();
        let mods = table.modification_count();

        prop_assert_eq!(table.remove(&absent), None);
        prop_assert_eq!(table.len(), len);
        prop_assert_eq!(table.modification_count(), mods);
    }

    #[test]
    fn prop_growth_doubles_and_keeps_entries(
        keys in proptest::collection::vec(any::<u16>(), 1..200),
    ) {
        let mut table = small_table(0.45);
        let mut model: HashMap<u16, u32> = HashMap::new();

        for (i, key) in keys.into_iter().enumerate() {
            let before = table.capacity();
            let must_grow = table.used_buckets() >= table.threshold();
            let value = i as u32;
            table.insert(key, value);
            model.insert(key, value);

            if must_grow {
                prop_assert_eq!(table.capacity(), before * 2);
                prop_assert_eq!(table.tombstones(), 0);
            } else {
                prop_assert_eq!(table.capacity(), before);
            }
        }

        for (key, value) in &model {
            prop_assert_eq!(table.peek(key), Some(value));
        }
    }
}
