//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    calls_handler, flush_handler, get_float_handler, get_handler, get_int_handler,
    get_str_handler, health_handler, stats_handler, store_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /store` - Store a typed value under a generated key
/// - `GET /get/:key` - Retrieve a value in its stored type
/// - `GET /get/:key/str` - Retrieve a value decoded as UTF-8
/// - `GET /get/:key/int` - Retrieve a value parsed as an integer
/// - `GET /get/:key/float` - Retrieve a value parsed as a float
/// - `GET /calls/:op` - Call count and history of an operation
/// - `POST /flush` - Drop all entries and instrumentation state
/// - `GET /stats` - Store statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/store", put(store_handler))
        .route("/get/:key", get(get_handler))
        .route("/get/:key/str", get(get_str_handler))
        .route("/get/:key/int", get(get_int_handler))
        .route("/get/:key/float", get(get_float_handler))
        .route("/calls/:op", get(calls_handler))
        .route("/flush", post(flush_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
