//! Store Statistics Module
//!
//! Tracks lookups, admission rejections and the byte footprint.

use serde::Serialize;

// == HotPath Stats ==
/// Snapshot of store activity and memory use.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HotPathStats {
    /// Lookups that found their key
    pub hits: u64,
    /// Lookups for keys that were not stored
    pub misses: u64,
    /// Writes refused by admission control
    pub rejections: u64,
    /// Current number of entries
    pub total_entries: usize,
    /// Bytes currently charged against the budget
    pub allocated: u64,
    /// Budget in effect when the snapshot was taken
    pub budget: u64,
}

impl HotPathStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Utilization ==
    /// Returns allocated / budget, or 0.0 when the budget is zero.
    pub fn utilization(&self) -> f64 {
        if self.budget == 0 {
            0.0
        } else {
            self.allocated as f64 / self.budget as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_rejection(&mut self) {
        self.rejections += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = HotPathStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.rejections, 0);
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.utilization(), 0.0);
    }

    #[test]
    fn test_hit_rate() {
        let mut stats = HotPathStats::new();
        for _ in 0..3 {
            stats.record_hit();
        }
        stats.record_miss();
        assert!((stats.hit_rate() - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_utilization() {
        let stats = HotPathStats {
            allocated: 10,
            budget: 40,
            ..HotPathStats::default()
        };
        assert!((stats.utilization() - 0.25).abs() < 0.001);
    }

    #[test]
    fn test_serialize() {
        let mut stats = HotPathStats::new();
        stats.record_rejection();
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"rejections\":1"));
    }
}
