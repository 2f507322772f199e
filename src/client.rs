//! Cache Client
//!
//! Stores values under generated keys and reads them back with optional
//! type conversion. `store` is instrumented with both call counting and
//! call history; reads are not.

use tracing::{debug, info};

use crate::backend::{Connection, StorageBackend};
use crate::cache::{KeyGenerator, Value};
use crate::error::{CacheError, Result};
use crate::instrument::{self, CallHistory};

/// Operation name under which `Cache::store` calls are recorded
pub const STORE_OP: &str = "Cache.store";

// == Cache ==
/// Client over a single backend connection.
///
/// Each `Cache` owns its handle; there is no process-wide client. Share one
/// across threads with `Arc<Cache<_>>`.
#[derive(Debug)]
pub struct Cache<C> {
    conn: C,
    keys: KeyGenerator,
}

impl<C: Connection> Cache<C> {
    // == Constructor ==
    /// Connects to `backend` and flushes it to an empty state.
    ///
    /// # Errors
    /// `CacheError::BackendUnavailable` if the backend cannot be reached.
    /// The error is surfaced as-is, without retrying.
    pub fn connect<B>(backend: &B) -> Result<Self>
    where
        B: StorageBackend<Connection = C>,
    {
        let conn = backend.connect()?;
        Self::with_connection(conn)
    }

    /// Wraps an already-open connection and flushes it.
    pub fn with_connection(conn: C) -> Result<Self> {
        conn.flush_all()
            .map_err(|e| CacheError::BackendUnavailable(e.to_string()))?;
        info!("Cache connected and flushed");
        Ok(Self {
            conn,
            keys: KeyGenerator::new(),
        })
    }

    /// Returns the underlying connection.
    pub fn connection(&self) -> &C {
        &self.conn
    }

    /// Flushes every entry and all instrumentation state.
    pub fn flush(&self) -> Result<()> {
        self.conn.flush_all()
    }

    // == Store ==
    /// Stores `value` under a freshly generated key and returns the key.
    ///
    /// Counted under [`STORE_OP`], with input and output reprs appended to
    /// its history lists.
    pub fn store(&self, value: impl Into<Value>) -> Result<String> {
        let op = |value: Value| self.store_value(value);
        let op = instrument::call_history(&self.conn, STORE_OP, op);
        let op = instrument::count_calls(&self.conn, STORE_OP, op);
        op(value.into())
    }

    fn store_value(&self, value: Value) -> Result<String> {
        let key = self.keys.new_key();
        debug!(key = %key, kind = value.type_name(), "Storing value");
        self.conn.set_value(&key, value)?;
        Ok(key)
    }

    // == Get ==
    /// Returns the value at `key` in its stored type, or `None` if absent.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        self.conn.get_value(key)
    }

    /// Returns the value at `key` passed through `convert`, or `None` if
    /// absent. `convert` is not called for absent keys and its errors are
    /// returned unchanged.
    pub fn get_with<T, F>(&self, key: &str, convert: F) -> Result<Option<T>>
    where
        F: FnOnce(Value) -> Result<T>,
    {
        match self.conn.get_value(key)? {
            Some(raw) => convert(raw).map(Some),
            None => Ok(None),
        }
    }

    /// Returns the value at `key` decoded as UTF-8 text.
    ///
    /// # Errors
    /// `CacheError::Decode` if the stored bytes are not valid UTF-8.
    pub fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, decode_utf8)
    }

    /// Returns the value at `key` parsed as a base-10 integer.
    ///
    /// # Errors
    /// `CacheError::Parse` if the stored text is not an integer.
    pub fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, parse_integer)
    }

    /// Returns the value at `key` parsed as a float.
    ///
    /// # Errors
    /// `CacheError::Parse` if the stored text is not a number.
    pub fn get_float(&self, key: &str) -> Result<Option<f64>> {
        self.get_with(key, parse_float)
    }

    // == Instrumentation ==
    /// Number of recorded calls of `op`.
    pub fn call_count(&self, op: &str) -> Result<i64> {
        instrument::call_count(&self.conn, op)
    }

    /// Recorded inputs and outputs of `op`.
    pub fn call_history(&self, op: &str) -> Result<CallHistory> {
        instrument::history(&self.conn, op)
    }

    /// Display lines describing every recorded call of `op`.
    pub fn replay(&self, op: &str) -> Result<Vec<String>> {
        instrument::replay(&self.conn, op)
    }
}

// == Conversions ==
/// Decodes a raw value as UTF-8 text.
pub fn decode_utf8(raw: Value) -> Result<String> {
    match raw {
        Value::String(s) => Ok(s),
        other => {
            String::from_utf8(other.into_bytes()).map_err(|e| CacheError::Decode(e.utf8_error()))
        }
    }
}

/// Parses a raw value as a base-10 `i64`. Surrounding whitespace is
/// ignored.
pub fn parse_integer(raw: Value) -> Result<i64> {
    if let Value::Int(i) = raw {
        return Ok(i);
    }
    let bytes = raw.to_bytes();
    let text = std::str::from_utf8(&bytes).unwrap_or("");
    text.trim()
        .parse::<i64>()
        .map_err(|e| CacheError::parse_int(&bytes, e))
}

/// Parses a raw value as an `f64`. Surrounding whitespace is ignored.
pub fn parse_float(raw: Value) -> Result<f64> {
    match raw {
        Value::Float(f) => Ok(f),
        // Rounds to the nearest f64 above 2^53, same as parsing the text
        Value::Int(i) => Ok(i as f64),
        other => {
            let bytes = other.to_bytes();
            let text = std::str::from_utf8(&bytes).unwrap_or("");
            text.trim()
                .parse::<f64>()
                .map_err(|e| CacheError::parse_float(&bytes, e))
        }
    }
}
