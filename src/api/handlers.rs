//! API Handlers
//!
//! HTTP request handlers for each hot path endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{HotPathError, Result};
use crate::models::{
    validate_key, DeleteResponse, HealthResponse, ResetResponse, SetRequest, SetResponse,
    StatsResponse,
};
use crate::store::HotPath;

/// Application state shared across all handlers.
///
/// The store sits behind a single lock, so admission and mutation of one
/// write never interleave with another.
#[derive(Clone)]
pub struct AppState {
    /// Shared store
    pub store: Arc<RwLock<HotPath>>,
}

impl AppState {
    /// Creates a new AppState with the given store.
    pub fn new(store: HotPath) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        let store = HotPath::new(config.store.clone())?;
        Ok(Self::new(store))
    }
}

/// Handler for PUT /set
///
/// Stores a text value as its UTF-8 bytes.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(HotPathError::InvalidRequest(error_msg));
    }

    store_bytes(&state, req.key, req.value.as_bytes()).await
}

/// Handler for PUT /raw/:key
///
/// Stores the request body verbatim.
pub async fn raw_set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(HotPathError::InvalidRequest(error_msg));
    }

    store_bytes(&state, key, &body).await
}

async fn store_bytes(state: &AppState, key: String, value: &[u8]) -> Result<Json<SetResponse>> {
    let mut store = state.store.write().await;
    if !store.set(&key, value)? {
        return Err(HotPathError::OverBudget(format!(
            "'{}' needs more than the {} bytes left",
            key,
            store.budget().saturating_sub(store.allocated())
        )));
    }

    Ok(Json(SetResponse::new(key, store.allocated())))
}

/// Handler for GET /get/:key
///
/// Returns the stored bytes as `application/octet-stream`.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response> {
    // Write lock: lookups update the hit/miss counters
    let mut store = state.store.write().await;
    let value = store
        .get(&key)
        .map(<[u8]>::to_vec)
        .ok_or(HotPathError::NotFound(key))?;

    Ok(([(header::CONTENT_TYPE, "application/octet-stream")], value).into_response())
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut store = state.store.write().await;
    if !store.remove(&key)? {
        return Err(HotPathError::NotFound(key));
    }

    Ok(Json(DeleteResponse::new(key, store.allocated())))
}

/// Handler for POST /reset
pub async fn reset_handler(State(state): State<AppState>) -> Result<Json<ResetResponse>> {
    let mut store = state.store.write().await;
    store.reset()?;

    Ok(Json(ResetResponse::new()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let store = state.store.read().await;

    Json(StatsResponse::from(store.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
