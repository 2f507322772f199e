//! Store Statistics Module
//!
//! Point-in-time snapshot of what the store currently holds.

use serde::Serialize;

// == Store Stats ==
/// Snapshot of store contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreStats {
    /// Current number of entries in the store
    pub total_entries: usize,
    /// Number of named counters
    pub counters: usize,
    /// Number of named history lists
    pub lists: usize,
    /// Number of `set` calls since the last initialize
    pub writes: u64,
}

impl StoreStats {
    // == Constructor ==
    /// Creates a new StoreStats with all counts at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries, counters or lists.
    pub fn is_empty(&self) -> bool {
        self.total_entries == 0 && self.counters == 0 && self.lists == 0
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = StoreStats::new();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.counters, 0);
        assert_eq!(stats.lists, 0);
        assert_eq!(stats.writes, 0);
        assert!(stats.is_empty());
    }

    #[test]
    fn test_writes_alone_do_not_count_as_content() {
        let stats = StoreStats {
            writes: 3,
            ..StoreStats::new()
        };
        assert!(stats.is_empty());
    }

    #[test]
    fn test_stats_serialize() {
        let stats = StoreStats {
            total_entries: 2,
            counters: 1,
            lists: 2,
            writes: 5,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"total_entries\":2"));
        assert!(json.contains("\"writes\":5"));
    }
}
