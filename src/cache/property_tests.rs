//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store's expiry and overwrite behavior over
//! generated keys, values and TTLs. Time is driven by a `ManualClock`.

use proptest::prelude::*;
use std::sync::Arc;

use crate::cache::{ExpiringStore, ManualClock};

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;

fn store_with_clock(max_entries: usize) -> (ExpiringStore<String>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::starting_now());
    (ExpiringStore::with_clock(max_entries, clock.clone()), clock)
}

// == Strategies ==
/// Generates valid keys (non-empty, within length limit)
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:]{1,64}"
}

fn valid_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,256}"
}

#[derive(Debug, Clone)]
enum StoreOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (valid_key_strategy(), valid_value_strategy())
            .prop_map(|(key, value)| StoreOp::Set { key, value }),
        valid_key_strategy().prop_map(|key| StoreOp::Get { key }),
        valid_key_strategy().prop_map(|key| StoreOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing then reading before expiry returns the stored value, and the
    // read after the TTL has fully elapsed returns nothing.
    #[test]
    fn prop_ttl_round_trip(
        key in valid_key_strategy(),
        value in valid_value_strategy(),
        ttl in 1i64..86_400
    ) {
        let (mut store, clock) = store_with_clock(TEST_MAX_ENTRIES);

        store.set(key.clone(), value.clone(), Some(ttl)).unwrap();
        prop_assert_eq!(store.get(&key), Some(value.clone()));

        clock.advance_secs(ttl as u64 - 1);
        prop_assert_eq!(store.get(&key), Some(value));

        clock.advance_secs(1);
        prop_assert_eq!(store.get(&key), None);
        prop_assert!(store.is_empty(), "expired entry should be purged on read");
    }

    // A TTL of zero or below stores the value without expiry.
    #[test]
    fn prop_non_positive_ttl_never_expires(
        key in valid_key_strategy(),
        value in valid_value_strategy(),
        ttl in -3_600i64..=0,
        elapsed in 0u64..10_000_000
    ) {
        let (mut store, clock) = store_with_clock(TEST_MAX_ENTRIES);

        store.set(key.clone(), value.clone(), Some(ttl)).unwrap();
        clock.advance_secs(elapsed);

        prop_assert_eq!(store.get(&key), Some(value));
    }

    // The second write under a key wins and leaves a single entry.
    #[test]
    fn prop_overwrite_semantics(
        key in valid_key_strategy(),
        value1 in valid_value_strategy(),
        value2 in valid_value_strategy()
    ) {
        let (mut store, _) = store_with_clock(TEST_MAX_ENTRIES);

        store.set(key.clone(), value1, Some(60)).unwrap();
        store.set(key.clone(), value2.clone(), None).unwrap();

        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // The store never holds more than its capacity.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec(
            (valid_key_strategy(), valid_value_strategy()),
            1..200
        )
    ) {
        let max_entries = 50;
        let (mut store, _) = store_with_clock(max_entries);

        for (key, value) in entries {
            let _ = store.set(key, value, None);
            prop_assert!(store.len() <= max_entries);
        }
    }

    // Hit and miss counters track every read.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(store_op_strategy(), 1..50)) {
        let (mut store, _) = store_with_clock(TEST_MAX_ENTRIES);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                StoreOp::Set { key, value } => {
                    let _ = store.set(key, value, None);
                }
                StoreOp::Get { key } => match store.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                StoreOp::Delete { key } => {
                    store.delete(&key);
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.total_entries, store.len());
    }
}

// Writes from concurrent tasks to one key leave exactly one of the written
// values, never a mix.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn prop_concurrent_overwrite_is_atomic(
        values in prop::collection::vec(valid_value_strategy(), 2..20)
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();

        let final_value = rt.block_on(async {
            let store = ExpiringStore::<String>::new(TEST_MAX_ENTRIES).into_shared();

            let handles: Vec<_> = values
                .iter()
                .cloned()
                .map(|value| {
                    let store = Arc::clone(&store);
                    tokio::spawn(async move {
                        store.write().await.set("shared", value, Some(60)).unwrap();
                    })
                })
                .collect();

            for handle in handles {
                handle.await.unwrap();
            }

            let mut guard = store.write().await;
            (guard.get("shared"), guard.len())
        });

        let (value, len) = final_value;
        prop_assert_eq!(len, 1);
        prop_assert!(value.map(|v| values.contains(&v)).unwrap_or(false));
    }
}
