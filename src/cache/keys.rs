//! Key Generation Module
//!
//! Mints opaque, collision-free keys for new entries.

use uuid::Uuid;

// == Key Generator ==
/// Produces random 128-bit identifiers rendered as canonical hyphenated hex.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyGenerator;

impl KeyGenerator {
    /// Creates a new key generator.
    pub fn new() -> Self {
        Self
    }

    // == New Key ==
    /// Returns a fresh UUIDv4 string, e.g. `"9b2d6f0e-5c1a-4e0b-8f47-3a1d2c9e7b10"`.
    pub fn new_key(&self) -> String {
        Uuid::new_v4().hyphenated().to_string()
    }
}
