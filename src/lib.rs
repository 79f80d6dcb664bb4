//! HotPath - A bounded in-memory buffer store
//!
//! Keeps binary payloads under a strict byte budget: every write is priced in
//! bytes and refused when it would not fit. The budget is either fixed or a
//! fraction of host memory, refreshed in the background.
//!
//! ```ignore
//! use hotpath::{HotPath, HotPathConfig};
//!
//! let mut hp = HotPath::new(HotPathConfig::available(100).with_key(true))?;
//! assert!(hp.set("foo", "bar")?);
//! assert_eq!(hp.get("foo"), Some(&b"bar"[..]));
//! hp.destroy();
//! ```

pub mod api;
pub mod budget;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::{Config, HotPathConfig};
pub use error::{HotPathError, Result};
pub use store::{HotPath, HotPathStats};
pub use tasks::spawn_refresh_task;
