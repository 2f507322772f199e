//! Cache Module
//!
//! Provides the in-memory engine: typed values, entries, key generation and
//! the concurrent key-value store.

mod entry;
mod keys;
mod stats;
mod store;
mod value;


// Re-export public types
pub use entry::CacheEntry;
pub use keys::KeyGenerator;
pub use stats::StoreStats;
pub use store::KeyValueStore;
pub use value::Value;

// == Public Constants ==
/// Default maximum key length in bytes accepted over HTTP
pub const MAX_KEY_LENGTH: usize = 256;

/// Default maximum value size in bytes accepted over HTTP
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
