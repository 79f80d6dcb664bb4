//! Error types for the hot path store
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == HotPath Error Enum ==
/// Unified error type for the store and its HTTP front.
///
/// Budget rejections and missing keys are ordinary return values on the
/// store itself; `NotFound`, `InvalidRequest` and `OverBudget` only appear
/// at the HTTP layer.
#[derive(Error, Debug)]
pub enum HotPathError {
    /// Configuration rejected at construction
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Mutating call on a store that was already destroyed
    #[error("Store has been destroyed")]
    Destroyed,

    /// Value could not be coerced to bytes
    #[error("Encoding failed: {0}")]
    Encoding(String),

    /// Key not found in the store
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Write refused because it does not fit in the budget
    #[error("Over budget: {0}")]
    OverBudget(String),
}

impl From<serde_json::Error> for HotPathError {
    fn from(err: serde_json::Error) -> Self {
        HotPathError::Encoding(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for HotPathError {
    fn into_response(self) -> Response {
        let status = match &self {
            HotPathError::NotFound(_) => StatusCode::NOT_FOUND,
            HotPathError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            HotPathError::OverBudget(_) | HotPathError::Destroyed => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            HotPathError::InvalidConfig(_) | HotPathError::Encoding(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the hot path store.
pub type Result<T> = std::result::Result<T, HotPathError>;
