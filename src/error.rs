//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use std::num::{ParseFloatError, ParseIntError};
use std::str::Utf8Error;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// An absent key is not an error for the core API, which returns `None`.
/// `NotFound` is only produced at the HTTP boundary.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Stored bytes are not valid UTF-8
    #[error("Value is not valid UTF-8: {0}")]
    Decode(#[from] Utf8Error),

    /// Stored value is not a valid numeric representation
    #[error("Cannot parse {input:?} as {target}: {reason}")]
    Parse {
        input: String,
        target: &'static str,
        reason: String,
    },

    /// A caller-supplied conversion failed
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// The storage backend cannot be reached
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl CacheError {
    /// Builds a `Parse` error for an integer conversion.
    pub fn parse_int(input: &[u8], err: ParseIntError) -> Self {
        CacheError::Parse {
            input: String::from_utf8_lossy(input).into_owned(),
            target: "integer",
            reason: err.to_string(),
        }
    }

    /// Builds a `Parse` error for a float conversion.
    pub fn parse_float(input: &[u8], err: ParseFloatError) -> Self {
        CacheError::Parse {
            input: String::from_utf8_lossy(input).into_owned(),
            target: "float",
            reason: err.to_string(),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Decode(_) | CacheError::Parse { .. } | CacheError::Conversion(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
