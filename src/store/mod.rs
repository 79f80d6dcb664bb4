//! Store Module
//!
//! Bounded in-memory buffer storage with byte accounting and admission control.

mod accountant;
mod admission;
mod entry;
mod hotpath;
mod stats;


// Re-export public types
pub use accountant::ByteAccountant;
pub use admission::AdmissionController;
pub use entry::Entry;
pub use hotpath::HotPath;
pub use stats::HotPathStats;
