//! API Module
//!
//! HTTP handlers and routing for the hot path REST API.
//!
//! # Endpoints
//! - `PUT /set` - Store a text value
//! - `PUT /raw/:key` - Store raw bytes
//! - `GET /get/:key` - Retrieve stored bytes
//! - `DELETE /del/:key` - Delete a key
//! - `POST /reset` - Drop every entry
//! - `GET /stats` - Get store statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
