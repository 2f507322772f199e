//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use crate::cache::Value;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// The stored value
    pub value: Value,
    /// Logical order index assigned by the store on each write
    pub stored_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `stored_at` - Position of this write in the store's write order
    pub fn new(value: Value, stored_at: u64) -> Self {
        Self { value, stored_at }
    }

    // == Ordering ==
    /// Returns true if this entry was written after `other`.
    pub fn is_newer_than(&self, other: &CacheEntry) -> bool {
        self.stored_at > other.stored_at
    }
}
