//! Host Memory Module
//!
//! Capability for reading total and available host memory.

use std::sync::Mutex;

use sysinfo::System;

// == Memory Snapshot ==
/// Host memory figures in bytes, taken at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemorySnapshot {
    pub total: u64,
    pub available: u64,
}

/// Source of host memory figures.
///
/// Probes are expected to be fast local calls; implementations must not block
/// on I/O for long since the refresh task calls them on every tick.
pub trait HostMemory: Send + Sync {
    fn snapshot(&self) -> MemorySnapshot;
}

// == System Memory ==
/// [`HostMemory`] backed by `sysinfo`.
#[derive(Debug)]
pub struct SystemMemory {
    system: Mutex<System>,
}

impl SystemMemory {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }
}

impl Default for SystemMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl HostMemory for SystemMemory {
    fn snapshot(&self) -> MemorySnapshot {
        let mut system = self
            .system
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        system.refresh_memory();

        MemorySnapshot {
            total: system.total_memory(),
            available: system.available_memory(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_memory_is_consistent() {
        let snapshot = SystemMemory::new().snapshot();
        assert!(snapshot.available <= snapshot.total);
    }
}
