//! HotPath Store Module
//!
//! The bounded buffer store: byte accounting, admission control and the
//! key/value mapping, plus teardown of the ram-mode refresh task.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::budget::{BudgetResolver, SharedBudget};
use crate::config::{BudgetMode, HotPathConfig};
use crate::error::{HotPathError, Result};
use crate::store::{AdmissionController, ByteAccountant, Entry, HotPathStats};
use crate::tasks::spawn_refresh_task;

// == HotPath ==
/// In-memory buffer store that refuses writes exceeding its byte budget.
///
/// All operations take `&mut self`, so an admission check and the mutation it
/// guards can never interleave with another write. Share a store between
/// tasks through a single lock, e.g. `Arc<RwLock<HotPath>>`.
///
/// After [`destroy`](Self::destroy) every mutating operation returns
/// [`HotPathError::Destroyed`] and [`get`](Self::get) finds nothing.
#[derive(Debug)]
pub struct HotPath {
    /// Key-value storage
    storage: HashMap<String, Entry>,
    /// Sum of the recorded cost of every entry
    allocated: u64,
    accountant: ByteAccountant,
    admission: AdmissionController,
    budget: Arc<SharedBudget>,
    stats: HotPathStats,
    /// Ram-mode refresh task, if any
    refresher: Option<JoinHandle<()>>,
    destroyed: bool,
}

impl HotPath {
    // == Constructor ==
    /// Creates a store from `config`.
    ///
    /// Ram mode probes host memory through `sysinfo` and spawns a refresh
    /// task, so it must be constructed inside a tokio runtime.
    pub fn new(config: HotPathConfig) -> Result<Self> {
        let mode = config.budget_mode()?;
        let budget = SharedBudget::from_mode(mode, config.share);
        Self::build(&config, mode, budget)
    }

    /// Creates a store whose granted memory comes from `resolver`.
    ///
    /// The budget mode in `config` still decides whether the budget is
    /// refreshed periodically.
    pub fn with_resolver(config: HotPathConfig, resolver: Box<dyn BudgetResolver>) -> Result<Self> {
        let mode = config.budget_mode()?;
        let budget = SharedBudget::new(resolver, config.share);
        Self::build(&config, mode, budget)
    }

    fn build(config: &HotPathConfig, mode: BudgetMode, budget: SharedBudget) -> Result<Self> {
        let budget = Arc::new(budget);

        let refresher = match mode {
            BudgetMode::Fixed(_) => None,
            BudgetMode::Ram { .. } => {
                if Handle::try_current().is_err() {
                    return Err(HotPathError::InvalidConfig(
                        "ram mode requires a running tokio runtime".to_string(),
                    ));
                }
                Some(spawn_refresh_task(budget.clone(), config.refresh_interval))
            }
        };

        info!(
            "HotPath created: mode={:?}, budget={} bytes, key_accounting={}",
            mode,
            budget.current(),
            config.key
        );

        Ok(Self {
            storage: HashMap::new(),
            allocated: 0,
            accountant: ByteAccountant::new(config.key, config.prefix.clone()),
            admission: AdmissionController::new(budget.clone()),
            budget,
            stats: HotPathStats::new(),
            refresher,
            destroyed: false,
        })
    }

    // == Set ==
    /// Stores `value` under `key` if it fits the budget.
    ///
    /// Returns `Ok(false)` without touching the store when admission fails,
    /// including when an existing key would be overwritten. The check counts
    /// the full current allocation, the old value included.
    pub fn set(&mut self, key: &str, value: impl AsRef<[u8]>) -> Result<bool> {
        self.ensure_active()?;

        let value = value.as_ref();
        let cost = self.accountant.cost(key, value);

        if !self.admission.try_reserve(self.allocated, cost) {
            self.stats.record_rejection();
            return Ok(false);
        }

        if let Some(previous) = self.storage.remove(key) {
            self.allocated -= previous.cost();
        }
        self.storage.insert(key.to_string(), Entry::new(value, cost));
        self.allocated += cost;

        debug!("Stored '{}': cost={} allocated={}", key, cost, self.allocated);
        self.check_invariant();
        Ok(true)
    }

    // == Set JSON ==
    /// Serializes `value` to JSON and stores the resulting bytes.
    ///
    /// A value that cannot be serialized is reported as
    /// [`HotPathError::Encoding`] and nothing is stored.
    pub fn set_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<bool> {
        self.ensure_active()?;
        let bytes = serde_json::to_vec(value)?;
        self.set(key, bytes)
    }

    // == Get ==
    /// Returns the bytes stored under `key`, or `None` if there are none.
    pub fn get(&mut self, key: &str) -> Option<&[u8]> {
        match self.storage.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Remove ==
    /// Removes `key`, releasing the cost it was charged.
    ///
    /// Returns `Ok(false)` when the key was not stored.
    pub fn remove(&mut self, key: &str) -> Result<bool> {
        self.ensure_active()?;

        let removed = match self.storage.remove(key) {
            Some(entry) => {
                self.allocated -= entry.cost();
                true
            }
            None => false,
        };

        self.check_invariant();
        Ok(removed)
    }

    // == Reset ==
    /// Drops every entry and zeroes the allocation.
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_active()?;

        let count = self.storage.len();
        self.storage.clear();
        self.allocated = 0;

        debug!("Reset cleared {} entries", count);
        self.check_invariant();
        Ok(())
    }

    // == Destroy ==
    /// Stops the refresh task and releases all entries. Safe to call twice.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        self.budget.stop();
        if let Some(handle) = self.refresher.take() {
            handle.abort();
            warn!("Budget refresh task aborted");
        }

        self.storage = HashMap::new();
        self.allocated = 0;
        info!("HotPath destroyed");
    }

    // == Introspection ==
    /// Bytes currently charged against the budget.
    pub fn allocated(&self) -> u64 {
        self.allocated
    }

    /// Budget currently in effect, in bytes.
    pub fn budget(&self) -> u64 {
        self.admission.budget()
    }

    /// Prefix charged per entry in key-inclusive accounting.
    pub fn prefix(&self) -> &str {
        self.accountant.prefix()
    }

    pub fn key_accounting(&self) -> bool {
        self.accountant.includes_key()
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.storage.contains_key(key)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Returns current statistics.
    pub fn stats(&self) -> HotPathStats {
        HotPathStats {
            total_entries: self.storage.len(),
            allocated: self.allocated,
            budget: self.budget(),
            ..self.stats.clone()
        }
    }

    fn ensure_active(&self) -> Result<()> {
        if self.destroyed {
            Err(HotPathError::Destroyed)
        } else {
            Ok(())
        }
    }

    /// Sum of the costs recorded on the stored entries.
    pub(crate) fn recorded_cost(&self) -> u64 {
        self.storage.values().map(Entry::cost).sum()
    }

    fn check_invariant(&self) {
        debug_assert_eq!(
            self.allocated,
            self.recorded_cost(),
            "allocated drifted from the stored entries"
        );
    }
}

impl Drop for HotPath {
    fn drop(&mut self) {
        self.destroy();
    }
}
