//! Instrumented Cache - an in-memory key-value cache with call instrumentation
//!
//! Stores scalar and binary values under generated keys, reads them back
//! with optional type conversion, and records per-operation call counts and
//! input/output history.

pub mod api;
pub mod backend;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod instrument;
pub mod models;

pub use api::AppState;
pub use backend::{Connection, MemoryBackend, StorageBackend};
pub use cache::{KeyValueStore, Value};
pub use client::{Cache, STORE_OP};
pub use config::Config;
pub use error::{CacheError, Result};
