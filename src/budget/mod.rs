//! Budget Module
//!
//! Resolves the byte ceiling the store admits writes against, either fixed or
//! derived from host memory.

mod host;
mod resolver;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tracing::debug;

use crate::config::BudgetMode;

pub use host::{HostMemory, MemorySnapshot, SystemMemory};
pub use resolver::{BudgetResolver, FixedBudget, RamBudget, MAX_RAM_FRACTION};

// == Shared Budget ==
/// The budget currently in effect, shared between the store and the refresh task.
///
/// The value is published with a single atomic store, so an admission check
/// observes either the previous or the new budget in full.
pub struct SharedBudget {
    resolver: Box<dyn BudgetResolver>,
    share: f64,
    current: AtomicU64,
    /// Held across every publish, so nothing lands once it reads true
    stopped: Mutex<bool>,
}

impl SharedBudget {
    /// Creates the budget and resolves it once.
    pub fn new(resolver: Box<dyn BudgetResolver>, share: f64) -> Self {
        let budget = Self {
            resolver,
            share,
            current: AtomicU64::new(0),
            stopped: Mutex::new(false),
        };
        budget.refresh();
        budget
    }

    /// Builds the resolver for a validated [`BudgetMode`], probing host
    /// memory through `sysinfo` in ram mode.
    pub fn from_mode(mode: BudgetMode, share: f64) -> Self {
        let resolver: Box<dyn BudgetResolver> = match mode {
            BudgetMode::Fixed(bytes) => Box::new(FixedBudget(bytes)),
            BudgetMode::Ram { fraction, ceiling } => {
                Box::new(RamBudget::new(SystemMemory::new(), fraction, ceiling))
            }
        };
        Self::new(resolver, share)
    }

    /// Payload budget in bytes.
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::Acquire)
    }

    // == Refresh ==
    /// Re-resolves and publishes the budget.
    ///
    /// Returns `None` once the budget has been stopped; no value is published
    /// after [`stop`](Self::stop) returns, even if the resolver was already
    /// running when it was called.
    pub fn refresh(&self) -> Option<u64> {
        if self.is_stopped() {
            return None;
        }

        let granted = self.resolver.resolve();
        let budget = payload_share(granted, self.share);

        let stopped = self.lock_stopped();
        if *stopped {
            return None;
        }
        let previous = self.current.swap(budget, Ordering::AcqRel);
        drop(stopped);

        if previous != budget {
            debug!(
                "Budget refreshed: granted={} bytes, budget={} bytes (was {})",
                granted, budget, previous
            );
        }
        Some(budget)
    }

    pub fn stop(&self) {
        *self.lock_stopped() = true;
    }

    pub fn is_stopped(&self) -> bool {
        *self.lock_stopped()
    }

    fn lock_stopped(&self) -> std::sync::MutexGuard<'_, bool> {
        self.stopped
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for SharedBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedBudget")
            .field("share", &self.share)
            .field("current", &self.current())
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

/// Bytes of `granted` memory that payloads may use.
pub(crate) fn payload_share(granted: u64, share: f64) -> u64 {
    (granted as f64 * share).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, OnceLock, Weak};

    struct SteppedMemory(AtomicU64);

    impl HostMemory for Arc<SteppedMemory> {
        fn snapshot(&self) -> MemorySnapshot {
            let available = self.0.load(Ordering::SeqCst);
            MemorySnapshot {
                total: u64::MAX,
                available,
            }
        }
    }

    #[test]
    fn test_fixed_budget_applies_share() {
        let budget = SharedBudget::new(Box::new(FixedBudget(100)), 0.25);
        assert_eq!(budget.current(), 25);
    }

    #[test]
    fn test_full_share() {
        let budget = SharedBudget::new(Box::new(FixedBudget(100)), 1.0);
        assert_eq!(budget.current(), 100);
    }

    #[test]
    fn test_refresh_follows_host_memory() {
        let memory = Arc::new(SteppedMemory(AtomicU64::new(1000)));
        let resolver = RamBudget::new(memory.clone(), 0.5, u64::MAX);
        let budget = SharedBudget::new(Box::new(resolver), 1.0);
        assert_eq!(budget.current(), 500);

        memory.0.store(4000, Ordering::SeqCst);
        assert_eq!(budget.refresh(), Some(2000));
        assert_eq!(budget.current(), 2000);
    }

    #[test]
    fn test_stopped_budget_no_longer_refreshes() {
        let memory = Arc::new(SteppedMemory(AtomicU64::new(1000)));
        let resolver = RamBudget::new(memory.clone(), 0.5, u64::MAX);
        let budget = SharedBudget::new(Box::new(resolver), 1.0);

        budget.stop();
        memory.0.store(4000, Ordering::SeqCst);

        assert_eq!(budget.refresh(), None);
        assert_eq!(budget.current(), 500);
    }

    /// Resolver that stops its own budget partway through a refresh
    struct StoppingResolver {
        budget: OnceLock<Weak<SharedBudget>>,
        granted: AtomicU64,
    }

    impl BudgetResolver for Arc<StoppingResolver> {
        fn resolve(&self) -> u64 {
            if let Some(budget) = self.budget.get().and_then(Weak::upgrade) {
                budget.stop();
            }
            self.granted.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn test_stop_during_resolve_discards_update() {
        let resolver = Arc::new(StoppingResolver {
            budget: OnceLock::new(),
            granted: AtomicU64::new(100),
        });
        let budget = Arc::new(SharedBudget::new(Box::new(resolver.clone()), 1.0));
        assert_eq!(budget.current(), 100);

        resolver.budget.set(Arc::downgrade(&budget)).unwrap();
        resolver.granted.store(900, Ordering::SeqCst);

        assert_eq!(budget.refresh(), None);
        assert!(budget.is_stopped());
        assert_eq!(budget.current(), 100);
    }
}
