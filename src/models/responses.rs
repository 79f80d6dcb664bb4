//! Response DTOs for the hot path API
//!
//! Defines the structure of outgoing HTTP response bodies. Values themselves
//! are returned as raw bytes, not JSON.

use serde::Serialize;

use crate::store::HotPathStats;

/// Response body for the SET operations (PUT /set, PUT /raw/:key)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
    /// Bytes charged against the budget after the write
    pub allocated: u64,
}

impl SetResponse {
    pub fn new(key: impl Into<String>, allocated: u64) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
            allocated,
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
    /// Bytes charged against the budget after the removal
    pub allocated: u64,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>, allocated: u64) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
            allocated,
        }
    }
}

/// Response body for the reset operation (POST /reset)
#[derive(Debug, Clone, Serialize)]
pub struct ResetResponse {
    pub message: String,
}

impl ResetResponse {
    pub fn new() -> Self {
        Self {
            message: "Store reset".to_string(),
        }
    }
}

impl Default for ResetResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookups that found their key
    pub hits: u64,
    /// Lookups for missing keys
    pub misses: u64,
    /// Writes refused for budget
    pub rejections: u64,
    /// Current number of entries
    pub total_entries: usize,
    /// Bytes charged against the budget
    pub allocated: u64,
    /// Budget in bytes
    pub budget: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// allocated / budget
    pub utilization: f64,
}

impl From<HotPathStats> for StatsResponse {
    fn from(stats: HotPathStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            utilization: stats.utilization(),
            hits: stats.hits,
            misses: stats.misses,
            rejections: stats.rejections,
            total_entries: stats.total_entries,
            allocated: stats.allocated,
            budget: stats.budget,
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
