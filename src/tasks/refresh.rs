//! Budget Refresh Task
//!
//! Background task that periodically re-resolves a ram-mode budget.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::budget::SharedBudget;

/// Spawns a background task that re-resolves `budget` every `interval`.
///
/// The task never takes the store lock; it only publishes a new value into
/// the shared budget. It exits on its own once the budget is stopped, and the
/// returned handle can be aborted to cancel it immediately.
///
/// Must be called from within a tokio runtime.
///
/// # Example
/// ```ignore
/// let budget = Arc::new(SharedBudget::from_mode(mode, 0.25));
/// let handle = spawn_refresh_task(budget.clone(), Duration::from_secs(10));
/// // Later, during teardown:
/// budget.stop();
/// handle.abort();
/// ```
pub fn spawn_refresh_task(budget: Arc<SharedBudget>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting budget refresh task with interval of {:?}",
            interval
        );

        let mut ticker = tokio::time::interval(interval);
        // The budget was resolved at construction; skip the immediate tick
        ticker.tick().await;

        loop {
            ticker.tick().await;

            match budget.refresh() {
                Some(current) => debug!("Budget refresh: {} bytes", current),
                None => {
                    debug!("Budget stopped, ending refresh task");
                    break;
                }
            }
        }
    })
}
