//! Cache Store Module
//!
//! Main cache engine: sharded key-value entries, named atomic counters and
//! append-only history lists.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::debug;

use crate::cache::{CacheEntry, StoreStats, Value};

// == Key Value Store ==
/// Thread-safe in-memory store.
///
/// Every map is a `DashMap`, so operations on keys in different shards
/// never contend, and each single-key mutation happens under that key's
/// shard lock:
/// - `set`/`get` on the same key are linearizable
/// - `increment` never loses an update
/// - `append_history` commits whole entries in a total order per list
#[derive(Debug, Default)]
pub struct KeyValueStore {
    /// Key-value storage
    entries: DashMap<String, CacheEntry>,
    /// Named invocation counters
    counters: DashMap<String, i64>,
    /// Named append-only lists
    lists: DashMap<String, Vec<Vec<u8>>>,
    /// Write sequence, source of `CacheEntry::stored_at`
    sequence: AtomicU64,
}

impl KeyValueStore {
    // == Constructor ==
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Initialize ==
    /// Clears all entries, counters and histories.
    ///
    /// Idempotent: initializing an empty store leaves it empty.
    pub fn initialize(&self) {
        self.entries.clear();
        self.counters.clear();
        self.lists.clear();
        self.sequence.store(0, Ordering::Release);
        debug!("Store initialized");
    }

    // == Set ==
    /// Inserts or overwrites the entry at `key`. Last write wins.
    ///
    /// The write sequence number is taken while holding the key's shard
    /// lock, so the surviving entry always carries the highest `stored_at`.
    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.entries
            .entry(key.into())
            .insert(CacheEntry::new(value, self.next_sequence()));
    }

    // == Get ==
    /// Returns a copy of the value stored at `key`, or `None` if absent.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Returns the full entry, including its write order index.
    pub fn entry(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    // == Increment ==
    /// Atomically increments the counter `counter_id` and returns the new
    /// value. A counter that does not exist yet starts from 0, so the first
    /// call returns 1.
    pub fn increment(&self, counter_id: &str) -> i64 {
        if let Some(mut counter) = self.counters.get_mut(counter_id) {
            *counter += 1;
            return *counter;
        }

        let mut counter = self.counters.entry(counter_id.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Returns the current value of `counter_id`, or `None` if it was never
    /// incremented.
    pub fn counter(&self, counter_id: &str) -> Option<i64> {
        self.counters.get(counter_id).map(|counter| *counter)
    }

    // == Append History ==
    /// Appends `entry` to the end of the list `list_id`, creating the list on
    /// first use.
    pub fn append_history(&self, list_id: &str, entry: impl Into<Vec<u8>>) {
        let entry = entry.into();
        if let Some(mut list) = self.lists.get_mut(list_id) {
            list.push(entry);
            return;
        }

        self.lists
            .entry(list_id.to_string())
            .or_insert_with(Vec::new)
            .push(entry);
    }

    /// Returns a copy of the list `list_id` in append order. Unknown lists
    /// are empty.
    pub fn history(&self, list_id: &str) -> Vec<Vec<u8>> {
        self.lists
            .get(list_id)
            .map(|list| list.value().clone())
            .unwrap_or_default()
    }

    // == Stats ==
    /// Returns a snapshot of the store's contents.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            total_entries: self.entries.len(),
            counters: self.counters.len(),
            lists: self.lists.len(),
            writes: self.sequence.load(Ordering::Acquire),
        }
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::AcqRel) + 1
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_store_new() {
        let store = KeyValueStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert!(store.stats().is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let store = KeyValueStore::new();

        store.set("key1", Value::from("value1"));
        assert_eq!(store.get("key1"), Some(Value::from("value1")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store = KeyValueStore::new();
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_get_has_no_side_effects() {
        let store = KeyValueStore::new();
        store.set("key1", Value::Int(1));
        let before = store.stats();

        store.get("key1");
        store.get("missing");

        assert_eq!(store.stats(), before);
    }

    #[test]
    fn test_store_overwrite() {
        let store = KeyValueStore::new();

        store.set("key1", Value::from("value1"));
        store.set("key1", Value::from(b"value2"));

        assert_eq!(store.get("key1"), Some(Value::from(b"value2")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_stored_at_increases() {
        let store = KeyValueStore::new();

        store.set("a", Value::Int(1));
        store.set("b", Value::Int(2));
        let a = store.entry("a").unwrap();
        let b = store.entry("b").unwrap();
        assert!(b.is_newer_than(&a));

        store.set("a", Value::Int(3));
        assert!(store.entry("a").unwrap().is_newer_than(&b));
    }

    #[test]
    fn test_store_overwrite_takes_new_sequence() {
        let store = KeyValueStore::new();

        store.set("key1", Value::Int(1));
        let first = store.entry("key1").unwrap();
        store.set("key1", Value::Int(2));
        let second = store.entry("key1").unwrap();

        assert_eq!(second.value, Value::Int(2));
        assert!(second.is_newer_than(&first));
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().writes, 2);
    }

    #[test]
    fn test_increment_starts_at_one() {
        let store = KeyValueStore::new();

        assert_eq!(store.counter("calls"), None);
        assert_eq!(store.increment("calls"), 1);
        assert_eq!(store.increment("calls"), 2);
        assert_eq!(store.increment("other"), 1);
        assert_eq!(store.counter("calls"), Some(2));
    }

    #[test]
    fn test_append_history_preserves_order() {
        let store = KeyValueStore::new();

        store.append_history("log", "first");
        store.append_history("log", "second");
        store.append_history("log", b"third".to_vec());

        assert_eq!(
            store.history("log"),
            vec![b"first".to_vec(), b"second".to_vec(), b"third".to_vec()]
        );
        assert!(store.history("unknown").is_empty());
    }

    #[test]
    fn test_initialize_clears_everything() {
        let store = KeyValueStore::new();
        store.set("key1", Value::Int(1));
        store.increment("calls");
        store.append_history("log", "entry");

        store.initialize();
        assert!(store.stats().is_empty());
        assert_eq!(store.stats().writes, 0);
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.counter("calls"), None);
        assert!(store.history("log").is_empty());

        // Idempotent
        store.initialize();
        assert!(store.stats().is_empty());
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let store = KeyValueStore::new();
        let threads = 8;
        let per_thread = 500;

        thread::scope(|s| {
            for _ in 0..threads {
                s.spawn(|| {
                    for _ in 0..per_thread {
                        store.increment("shared");
                    }
                });
            }
        });

        assert_eq!(store.counter("shared"), Some(threads * per_thread));
    }

    #[test]
    fn test_concurrent_appends_keep_whole_entries() {
        let store = KeyValueStore::new();
        let threads = 4;
        let per_thread = 250;

        thread::scope(|s| {
            for t in 0..threads {
                let store = &store;
                s.spawn(move || {
                    for i in 0..per_thread {
                        store.append_history("log", format!("{}:{}", t, i));
                    }
                });
            }
        });

        let log = store.history("log");
        assert_eq!(log.len(), threads * per_thread);

        let unique: HashSet<_> = log.iter().collect();
        assert_eq!(unique.len(), log.len());

        // Each writer's entries appear in that writer's program order
        for t in 0..threads {
            let prefix = format!("{}:", t);
            let seen: Vec<usize> = log
                .iter()
                .map(|e| String::from_utf8(e.clone()).unwrap())
                .filter_map(|e| e.strip_prefix(&prefix).map(|i| i.parse().unwrap()))
                .collect();
            assert_eq!(seen, (0..per_thread).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_concurrent_sets_on_distinct_keys() {
        let store = KeyValueStore::new();

        thread::scope(|s| {
            for t in 0..4 {
                let store = &store;
                s.spawn(move || {
                    for i in 0..100 {
                        store.set(format!("k{}-{}", t, i), Value::Int(i));
                    }
                });
            }
        });

        assert_eq!(store.len(), 400);
        assert_eq!(store.stats().writes, 400);
        assert_eq!(store.get("k3-99"), Some(Value::Int(99)));
    }
}
