//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use super::TypedValue;
use crate::cache::StoreStats;
use crate::instrument::CallHistory;

/// Response body for the STORE operation (PUT /store)
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    /// Success message
    pub message: String,
    /// The generated key
    pub key: String,
}

impl StoreResponse {
    /// Creates a new StoreResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Value stored under '{}'", key),
            key,
        }
    }
}

/// Response body for the raw GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value in its native type
    pub value: TypedValue,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: impl Into<TypedValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for converted reads (GET /get/:key/str|int|float)
#[derive(Debug, Clone, Serialize)]
pub struct ConvertedResponse<T> {
    /// The requested key
    pub key: String,
    /// The converted value
    pub value: T,
}

impl<T> ConvertedResponse<T> {
    /// Creates a new ConvertedResponse
    pub fn new(key: impl Into<String>, value: T) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the call log endpoint (GET /calls/:op)
#[derive(Debug, Clone, Serialize)]
pub struct CallsResponse {
    /// Operation name
    pub op: String,
    /// Number of recorded calls
    pub count: i64,
    /// Input and output reprs in call order
    #[serde(flatten)]
    pub history: CallHistory,
}

/// Response body for the flush endpoint (POST /flush)
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    /// Success message
    pub message: String,
}

impl FlushResponse {
    /// Creates a new FlushResponse
    pub fn flushed() -> Self {
        Self {
            message: "Cache flushed".to_string(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Current number of entries in the store
    pub total_entries: usize,
    /// Number of named counters
    pub counters: usize,
    /// Number of named lists
    pub lists: usize,
    /// Writes since the last flush
    pub writes: u64,
}

impl From<StoreStats> for StatsResponse {
    fn from(stats: StoreStats) -> Self {
        Self {
            total_entries: stats.total_entries,
            counters: stats.counters,
            lists: stats.lists,
            writes: stats.writes,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
