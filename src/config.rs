//! Configuration Module
//!
//! Store options plus the server settings loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::budget::payload_share;
use crate::error::{HotPathError, Result};

// == Defaults ==
/// Memory granted to the store when neither `available` nor `ram` is set.
pub const DEFAULT_AVAILABLE: u64 = 64 * 1024 * 1024;

/// Share of the granted memory that payloads may occupy.
pub const DEFAULT_SHARE: f64 = 0.25;

/// Prefix charged per entry in key-inclusive accounting.
pub const DEFAULT_PREFIX: &str = "~hp~";

/// Hard cap on the memory ram mode may claim.
pub const DEFAULT_RAM_CEILING: u64 = 1024 * 1024 * 1024;

/// Period between host memory probes in ram mode.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// How the store's budget is sourced, after validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetMode {
    /// Constant number of granted bytes
    Fixed(u64),
    /// Fraction of available host memory, capped at `ceiling`
    Ram { fraction: f64, ceiling: u64 },
}

/// Options accepted when constructing a [`HotPath`](crate::store::HotPath).
#[derive(Debug, Clone)]
pub struct HotPathConfig {
    /// Memory granted to the store in fixed mode
    pub available: Option<u64>,
    /// Fraction of host memory to claim; selects ram mode and wins over `available`
    pub ram: Option<f64>,
    /// Charge key bytes and the prefix on top of the value bytes
    pub key: bool,
    /// Namespacing prefix charged per entry when `key` is set
    pub prefix: String,
    /// Share of the granted memory payloads may occupy
    pub share: f64,
    /// Upper bound for ram mode
    pub ram_ceiling: u64,
    /// Ram mode refresh period
    pub refresh_interval: Duration,
}

impl HotPathConfig {
    /// Fixed mode with the given amount of granted memory.
    pub fn available(bytes: u64) -> Self {
        Self {
            available: Some(bytes),
            ..Self::default()
        }
    }

    /// Ram mode claiming `fraction` of the available host memory.
    pub fn ram(fraction: f64) -> Self {
        Self {
            ram: Some(fraction),
            ..Self::default()
        }
    }

    /// Enables or disables key-inclusive accounting.
    pub fn with_key(mut self, key: bool) -> Self {
        self.key = key;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_share(mut self, share: f64) -> Self {
        self.share = share;
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    // == Validate ==
    /// Checks the options and resolves which budget mode applies.
    ///
    /// Nothing is clamped silently: a zero budget, a non-finite fraction or a
    /// share outside `(0, 1]` is an error. Fractions above the ram maximum are
    /// normalized later by the resolver.
    pub fn budget_mode(&self) -> Result<BudgetMode> {
        if !(self.share.is_finite() && self.share > 0.0 && self.share <= 1.0) {
            return Err(HotPathError::InvalidConfig(format!(
                "share must be within (0, 1], got {}",
                self.share
            )));
        }

        match (self.ram, self.available) {
            (Some(fraction), available) => {
                if !(fraction.is_finite() && fraction > 0.0) {
                    return Err(HotPathError::InvalidConfig(format!(
                        "ram must be a positive fraction, got {}",
                        fraction
                    )));
                }
                if self.ram_ceiling == 0 {
                    return Err(HotPathError::InvalidConfig(
                        "ram_ceiling must be greater than zero".to_string(),
                    ));
                }
                if self.refresh_interval.is_zero() {
                    return Err(HotPathError::InvalidConfig(
                        "refresh_interval must be greater than zero".to_string(),
                    ));
                }
                if let Some(bytes) = available {
                    warn!(
                        "Both ram ({}) and available ({} bytes) configured, using ram",
                        fraction, bytes
                    );
                }
                Ok(BudgetMode::Ram {
                    fraction,
                    ceiling: self.ram_ceiling,
                })
            }
            (None, Some(0)) => Err(HotPathError::InvalidConfig(
                "available must be greater than zero".to_string(),
            )),
            (None, Some(bytes)) if payload_share(bytes, self.share) == 0 => {
                Err(HotPathError::InvalidConfig(format!(
                    "available ({} bytes) at share {} leaves no payload budget",
                    bytes, self.share
                )))
            }
            (None, Some(bytes)) => Ok(BudgetMode::Fixed(bytes)),
            (None, None) => Ok(BudgetMode::Fixed(DEFAULT_AVAILABLE)),
        }
    }
}

impl Default for HotPathConfig {
    fn default() -> Self {
        Self {
            available: None,
            ram: None,
            key: false,
            prefix: DEFAULT_PREFIX.to_string(),
            share: DEFAULT_SHARE,
            ram_ceiling: DEFAULT_RAM_CEILING,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Options for the hosted store
    pub store: HotPathConfig,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `HOTPATH_AVAILABLE` - Granted memory in bytes (fixed mode)
    /// - `HOTPATH_RAM` - Fraction of host memory (ram mode)
    /// - `HOTPATH_KEY` - Key-inclusive accounting (default: false)
    /// - `HOTPATH_PREFIX` - Per-entry prefix (default: `~hp~`)
    /// - `HOTPATH_SHARE` - Payload share of granted memory (default: 0.25)
    /// - `HOTPATH_RAM_CEILING` - Ram mode cap in bytes (default: 1 GiB)
    /// - `HOTPATH_REFRESH_INTERVAL` - Ram refresh period in seconds (default: 10)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    ///
    /// Values that fail to parse are reported instead of falling back to a default.
    pub fn from_env() -> Result<Self> {
        let defaults = HotPathConfig::default();

        let store = HotPathConfig {
            available: parse_var("HOTPATH_AVAILABLE")?,
            ram: parse_var("HOTPATH_RAM")?,
            key: parse_var("HOTPATH_KEY")?.unwrap_or(defaults.key),
            prefix: env::var("HOTPATH_PREFIX").unwrap_or(defaults.prefix),
            share: parse_var("HOTPATH_SHARE")?.unwrap_or(defaults.share),
            ram_ceiling: parse_var("HOTPATH_RAM_CEILING")?.unwrap_or(defaults.ram_ceiling),
            refresh_interval: parse_var("HOTPATH_REFRESH_INTERVAL")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.refresh_interval),
        };

        Ok(Self {
            store,
            server_port: parse_var("SERVER_PORT")?.unwrap_or(3000),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: HotPathConfig::default(),
            server_port: 3000,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
            HotPathError::InvalidConfig(format!("{} has an invalid value: {:?}", name, raw))
        }),
        Err(_) => Ok(None),
    }
}
