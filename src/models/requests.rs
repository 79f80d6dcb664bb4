//! Request DTOs for the hot path API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Largest key accepted over HTTP, in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The key to store the value under
/// - `value`: Text stored as its UTF-8 bytes
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The store key
    pub key: String,
    /// The value to store
    pub value: String,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

/// Checks a key received over HTTP.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}
