//! In-process backend over a shared [`KeyValueStore`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use super::{Connection, StorageBackend};
use crate::cache::{KeyValueStore, StoreStats, Value};
use crate::error::{CacheError, Result};

impl Connection for KeyValueStore {
    fn flush_all(&self) -> Result<()> {
        self.initialize();
        Ok(())
    }

    fn set_value(&self, key: &str, value: Value) -> Result<()> {
        self.set(key, value);
        Ok(())
    }

    fn get_value(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.get(key))
    }

    fn increment_counter(&self, name: &str) -> Result<i64> {
        Ok(self.increment(name))
    }

    fn append_to_list(&self, name: &str, value: Vec<u8>) -> Result<()> {
        self.append_history(name, value);
        Ok(())
    }

    fn list_range(&self, name: &str) -> Result<Vec<Vec<u8>>> {
        Ok(self.history(name))
    }

    fn counter(&self, name: &str) -> Result<Option<i64>> {
        Ok(KeyValueStore::counter(self, name))
    }

    fn stats(&self) -> Result<StoreStats> {
        Ok(KeyValueStore::stats(self))
    }
}

// == Memory Backend ==
/// Backend whose connections all share one in-memory store.
///
/// Once closed, new connections are refused. Connections handed out
/// earlier keep working against the same store.
#[derive(Debug)]
pub struct MemoryBackend {
    store: Arc<KeyValueStore>,
    open: AtomicBool,
}

impl MemoryBackend {
    /// Creates a backend over a fresh, empty store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(KeyValueStore::new()),
            open: AtomicBool::new(true),
        }
    }

    /// Returns the shared store.
    pub fn store(&self) -> &Arc<KeyValueStore> {
        &self.store
    }

    /// Stops accepting new connections.
    pub fn close(&self) {
        if self.open.swap(false, Ordering::AcqRel) {
            info!("Memory backend closed");
        }
    }

    /// Returns true while the backend accepts connections.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MemoryBackend {
    type Connection = Arc<KeyValueStore>;

    fn connect(&self) -> Result<Self::Connection> {
        if !self.is_open() {
            return Err(CacheError::BackendUnavailable(
                "memory backend is closed".to_string(),
            ));
        }
        debug!("Memory backend connection opened");
        Ok(Arc::clone(&self.store))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connections_share_one_store() {
        let backend = MemoryBackend::new();
        let first = backend.connect().unwrap();
        let second = backend.connect().unwrap();

        first.set_value("key", Value::Int(5)).unwrap();
        assert_eq!(second.get_value("key").unwrap(), Some(Value::Int(5)));
        assert_eq!(backend.store().len(), 1);
    }

    #[test]
    fn test_connection_operations() {
        let conn = MemoryBackend::new().connect().unwrap();

        assert_eq!(conn.increment_counter("c").unwrap(), 1);
        assert_eq!(conn.increment_counter("c").unwrap(), 2);
        assert_eq!(Connection::counter(&conn, "c").unwrap(), Some(2));

        conn.append_to_list("l", b"a".to_vec()).unwrap();
        conn.append_to_list("l", b"b".to_vec()).unwrap();
        assert_eq!(conn.list_range("l").unwrap(), vec![b"a".to_vec(), b"b".to_vec()]);

        conn.flush_all().unwrap();
        assert!(Connection::stats(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_closed_backend_refuses_connections() {
        let backend = MemoryBackend::new();
        let early = backend.connect().unwrap();

        backend.close();
        assert!(!backend.is_open());
        assert!(matches!(
            backend.connect(),
            Err(CacheError::BackendUnavailable(_))
        ));

        // Existing handles stay usable
        early.set_value("key", Value::from("v")).unwrap();
        assert_eq!(early.get_value("key").unwrap(), Some(Value::from("v")));
    }
}
