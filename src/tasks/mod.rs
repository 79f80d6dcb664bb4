//! Background Tasks Module
//!
//! Contains background tasks that run periodically for the life of a store.
//!
//! # Tasks
//! - Budget refresh: re-derives the ram-mode budget from host memory

mod refresh;

pub use refresh::spawn_refresh_task;
