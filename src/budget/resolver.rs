//! Budget Resolvers
//!
//! Strategies for deciding how much memory the store is granted.

use tracing::debug;

use super::host::HostMemory;

/// Largest fraction of host memory ram mode will ever claim.
pub const MAX_RAM_FRACTION: f64 = 0.9;

/// Produces the number of bytes granted to the store.
pub trait BudgetResolver: Send + Sync {
    fn resolve(&self) -> u64;
}

// == Fixed Budget ==
/// Grants a constant number of bytes for the life of the store.
#[derive(Debug, Clone, Copy)]
pub struct FixedBudget(pub u64);

impl BudgetResolver for FixedBudget {
    fn resolve(&self) -> u64 {
        self.0
    }
}

// == Ram Budget ==
/// Grants a fraction of the currently available host memory.
///
/// The grant is `min(available * fraction, total * MAX_RAM_FRACTION, ceiling)`,
/// so it grows with free memory but never approaches the whole machine.
pub struct RamBudget<M> {
    memory: M,
    fraction: f64,
    ceiling: u64,
}

impl<M: HostMemory> RamBudget<M> {
    /// Creates a resolver, normalizing `fraction` to at most [`MAX_RAM_FRACTION`].
    pub fn new(memory: M, fraction: f64, ceiling: u64) -> Self {
        let normalized = fraction.min(MAX_RAM_FRACTION);
        if normalized < fraction {
            debug!(
                "Normalized ram fraction {} down to {}",
                fraction, normalized
            );
        }

        Self {
            memory,
            fraction: normalized,
            ceiling,
        }
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }
}

impl<M: HostMemory> BudgetResolver for RamBudget<M> {
    fn resolve(&self) -> u64 {
        let snapshot = self.memory.snapshot();
        let wanted = (snapshot.available as f64 * self.fraction) as u64;
        let cap = (snapshot.total as f64 * MAX_RAM_FRACTION) as u64;

        wanted.min(cap).min(self.ceiling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::host::MemorySnapshot;

    const GIB: u64 = 1024 * 1024 * 1024;

    struct StaticMemory(MemorySnapshot);

    impl HostMemory for StaticMemory {
        fn snapshot(&self) -> MemorySnapshot {
            self.0
        }
    }

    fn host(total: u64, available: u64) -> StaticMemory {
        StaticMemory(MemorySnapshot { total, available })
    }

    #[test]
    fn test_fixed_budget_is_constant() {
        let resolver = FixedBudget(100);
        assert_eq!(resolver.resolve(), 100);
        assert_eq!(resolver.resolve(), 100);
    }

    #[test]
    fn test_ram_budget_takes_fraction_of_available() {
        let resolver = RamBudget::new(host(16 * GIB, 8 * GIB), 0.5, u64::MAX);
        assert_eq!(resolver.resolve(), 4 * GIB);
    }

    #[test]
    fn test_ram_normalized_to_maximum() {
        let resolver = RamBudget::new(host(10 * GIB, 10 * GIB), 1.0, u64::MAX);
        assert_eq!(resolver.fraction(), MAX_RAM_FRACTION);
        assert_eq!(resolver.resolve(), 9 * GIB);
    }

    #[test]
    fn test_ram_budget_respects_ceiling() {
        let resolver = RamBudget::new(host(64 * GIB, 32 * GIB), 0.5, GIB);
        assert_eq!(resolver.resolve(), GIB);
    }

    #[test]
    fn test_more_ram_allows_more_memory() {
        let small = RamBudget::new(host(16 * GIB, 2 * GIB), 0.5, u64::MAX);
        let large = RamBudget::new(host(16 * GIB, 8 * GIB), 0.5, u64::MAX);
        assert!(large.resolve() > small.resolve());
    }
}
