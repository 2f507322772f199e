//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use super::TypedValue;

/// Request body for the STORE operation (PUT /store)
///
/// # Fields
/// - `value`: The type-tagged value to store under a generated key
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRequest {
    /// The value to store
    pub value: TypedValue,
}

impl StoreRequest {
    /// Validates the request data against the configured size limit.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self, max_value_size: usize) -> Option<String> {
        let size = match &self.value {
            TypedValue::String(s) => s.len(),
            TypedValue::Bytes(b) => b.len(),
            TypedValue::Int(_) | TypedValue::Float(_) => return None,
        };
        if size > max_value_size {
            return Some(format!(
                "Value exceeds maximum size of {} bytes",
                max_value_size
            ));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_request_deserialize() {
        let json = r#"{"value": {"type": "string", "value": "hello"}}"#;
        let req: StoreRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.value, TypedValue::String("hello".to_string()));
    }

    #[test]
    fn test_store_request_missing_value() {
        let result: Result<StoreRequest, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_oversized_value() {
        let req = StoreRequest {
            value: TypedValue::Bytes(vec![0; 11]),
        };
        assert!(req.validate(10).is_some());
        assert!(req.validate(11).is_none());
    }

    #[test]
    fn test_validate_numbers_always_fit() {
        let req = StoreRequest {
            value: TypedValue::Int(i64::MAX),
        };
        assert!(req.validate(0).is_none());
    }
}
