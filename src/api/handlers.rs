//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::backend::{Connection, MemoryBackend};
use crate::cache::{KeyValueStore, Value};
use crate::client::{Cache, STORE_OP};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    CallsResponse, ConvertedResponse, FlushResponse, GetResponse, HealthResponse, StatsResponse,
    StoreRequest, StoreResponse,
};

/// Cache client over the in-process store.
pub type MemoryCache = Cache<Arc<KeyValueStore>>;

/// Application state shared across all handlers.
///
/// The cache is thread-safe on its own; handlers share it through an `Arc`
/// without any extra lock.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache client
    pub cache: Arc<MemoryCache>,
    /// Longest key accepted on lookups
    pub max_key_length: usize,
    /// Largest string/bytes value accepted on store
    pub max_value_size: usize,
}

impl AppState {
    /// Creates a new AppState with the given cache and default limits.
    pub fn new(cache: MemoryCache) -> Self {
        let defaults = Config::default();
        Self {
            cache: Arc::new(cache),
            max_key_length: defaults.max_key_length,
            max_value_size: defaults.max_value_size,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Connects a cache to a fresh in-memory backend and applies the
    /// configured limits.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Cache::connect(&MemoryBackend::new())?;
        Ok(Self {
            cache: Arc::new(cache),
            max_key_length: config.max_key_length,
            max_value_size: config.max_value_size,
        })
    }

    fn check_key(&self, key: &str) -> Result<()> {
        if key.len() > self.max_key_length {
            return Err(CacheError::InvalidRequest(format!(
                "Key exceeds maximum length of {} bytes",
                self.max_key_length
            )));
        }
        Ok(())
    }
}

/// Handler for PUT /store
///
/// Stores a typed value under a generated key.
pub async fn store_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    // Validate request
    if let Some(error_msg) = req.validate(state.max_value_size) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let key = state.cache.store(Value::from(req.value))?;

    Ok(Json(StoreResponse::new(key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value in its stored type.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    state.check_key(&key)?;
    let value = state
        .cache
        .get(&key)?
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for GET /get/:key/str
pub async fn get_str_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ConvertedResponse<String>>> {
    state.check_key(&key)?;
    let value = state
        .cache
        .get_str(&key)?
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(ConvertedResponse::new(key, value)))
}

/// Handler for GET /get/:key/int
pub async fn get_int_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ConvertedResponse<i64>>> {
    state.check_key(&key)?;
    let value = state
        .cache
        .get_int(&key)?
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(ConvertedResponse::new(key, value)))
}

/// Handler for GET /get/:key/float
pub async fn get_float_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ConvertedResponse<f64>>> {
    state.check_key(&key)?;
    let value = state
        .cache
        .get_float(&key)?
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(ConvertedResponse::new(key, value)))
}

/// Handler for GET /calls/:op
///
/// Returns the call count and recorded history of an operation. Operations
/// that were never called report a zero count and empty history.
pub async fn calls_handler(
    State(state): State<AppState>,
    Path(op): Path<String>,
) -> Result<Json<CallsResponse>> {
    let count = state.cache.call_count(&op)?;
    let history = state.cache.call_history(&op)?;

    Ok(Json(CallsResponse { op, count, history }))
}

/// Handler for POST /flush
///
/// Drops every entry, counter and history list.
pub async fn flush_handler(State(state): State<AppState>) -> Result<Json<FlushResponse>> {
    let stored = state.cache.call_count(STORE_OP)?;
    state.cache.flush()?;
    info!("Cache flushed after {} store calls", stored);

    Ok(Json(FlushResponse::flushed()))
}

/// Handler for GET /stats
///
/// Returns a snapshot of the store's contents.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state.cache.connection().stats()?;

    Ok(Json(StatsResponse::from(stats)))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
