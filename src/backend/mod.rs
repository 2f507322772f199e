//! Storage Backend Module
//!
//! The narrow interface the cache client uses to reach raw storage. A backend
//! may live in-process or behind a network protocol; the client only sees
//! these operations.

mod memory;

use std::sync::Arc;

pub use memory::MemoryBackend;

use crate::cache::{StoreStats, Value};
use crate::error::Result;

// == Storage Backend ==
/// Source of connections to a key-value engine.
pub trait StorageBackend {
    /// Handle type returned by [`StorageBackend::connect`]
    type Connection: Connection;

    /// Opens a connection. Fails with `CacheError::BackendUnavailable` when
    /// the engine cannot be reached; callers decide whether to retry.
    fn connect(&self) -> Result<Self::Connection>;
}

// == Connection ==
/// Operations available on a live backend handle.
pub trait Connection: Send + Sync {
    /// Removes every entry, counter and list.
    fn flush_all(&self) -> Result<()>;

    /// Inserts or overwrites the value at `key`.
    fn set_value(&self, key: &str, value: Value) -> Result<()>;

    /// Returns the value at `key`, or `None` if absent.
    fn get_value(&self, key: &str) -> Result<Option<Value>>;

    /// Atomically increments the named counter and returns its new value.
    fn increment_counter(&self, name: &str) -> Result<i64>;

    /// Appends `value` to the end of the named list.
    fn append_to_list(&self, name: &str, value: Vec<u8>) -> Result<()>;

    /// Returns the whole named list in append order.
    fn list_range(&self, name: &str) -> Result<Vec<Vec<u8>>>;

    /// Returns the named counter's value, or `None` if never incremented.
    fn counter(&self, name: &str) -> Result<Option<i64>>;

    /// Returns a snapshot of the backend's contents.
    fn stats(&self) -> Result<StoreStats>;
}

impl<C: Connection + ?Sized> Connection for Arc<C> {
    fn flush_all(&self) -> Result<()> {
        (**self).flush_all()
    }

    fn set_value(&self, key: &str, value: Value) -> Result<()> {
        (**self).set_value(key, value)
    }

    fn get_value(&self, key: &str) -> Result<Option<Value>> {
        (**self).get_value(key)
    }

    fn increment_counter(&self, name: &str) -> Result<i64> {
        (**self).increment_counter(name)
    }

    fn append_to_list(&self, name: &str, value: Vec<u8>) -> Result<()> {
        (**self).append_to_list(name, value)
    }

    fn list_range(&self, name: &str) -> Result<Vec<Vec<u8>>> {
        (**self).list_range(name)
    }

    fn counter(&self, name: &str) -> Result<Option<i64>> {
        (**self).counter(name)
    }

    fn stats(&self) -> Result<StoreStats> {
        (**self).stats()
    }
}
