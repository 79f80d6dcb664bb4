//! Admission Controller Module
//!
//! Decides whether a write fits the budget before anything is mutated.

use std::sync::Arc;

use tracing::debug;

use crate::budget::SharedBudget;

// == Admission Controller ==
/// Accepts a candidate iff `allocated + cost <= budget`.
#[derive(Debug, Clone)]
pub struct AdmissionController {
    budget: Arc<SharedBudget>,
}

impl AdmissionController {
    pub fn new(budget: Arc<SharedBudget>) -> Self {
        Self { budget }
    }

    // == Try Reserve ==
    /// Checks a candidate of `cost` bytes against the current budget.
    ///
    /// The budget is read once, so a concurrent refresh is seen either fully or
    /// not at all. A sum that overflows `u64` is rejected.
    pub fn try_reserve(&self, allocated: u64, cost: u64) -> bool {
        let budget = self.budget.current();
        let admitted = allocated
            .checked_add(cost)
            .is_some_and(|total| total <= budget);

        if !admitted {
            debug!(
                "Admission rejected: allocated={} cost={} budget={}",
                allocated, cost, budget
            );
        }
        admitted
    }

    pub fn budget(&self) -> u64 {
        self.budget.current()
    }
}
