//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `PUT /store` - Store a typed value under a generated key
//! - `GET /get/:key` - Retrieve a value (also `/str`, `/int`, `/float`)
//! - `GET /calls/:op` - Call count and history of an operation
//! - `POST /flush` - Drop all entries and instrumentation state
//! - `GET /stats` - Store statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
