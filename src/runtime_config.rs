//! # Runtime Configuration Module
//!
//! Environment-driven settings for the `may` coroutine runtime that hosts the server.
//!
//! ## Environment Variables
//!
//! ### `PLAINROUTER_STACK_SIZE`
//!
//! Stack size for connection coroutines. Accepts decimal (`16384`) or hexadecimal
//! (`0x4000`). Default: `0x4000` (16 KB). Handlers run on the connection coroutine, so
//! deep handler call chains need a larger stack.
//!
//! ### `PLAINROUTER_WORKERS`
//!
//! Number of worker threads the coroutine scheduler runs on.
//! Default: available parallelism.
//!
//! ## Usage
//!
//! ```rust
//! use plainrouter::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Stack size: {} bytes", config.stack_size);
//! ```

use std::env;
use tracing::{info, warn};

pub const STACK_SIZE_ENV: &str = "PLAINROUTER_STACK_SIZE";
pub const WORKERS_ENV: &str = "PLAINROUTER_WORKERS";
pub const DEFAULT_STACK_SIZE: usize = 0x4000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes
    pub stack_size: usize,
    /// Scheduler worker threads
    pub workers: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
            workers: default_workers(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables. Unparseable values fall back
    /// to the defaults with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RuntimeConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let stack_size = match lookup(STACK_SIZE_ENV) {
            Some(val) => parse_size(&val).unwrap_or_else(|| {
                warn!(var = STACK_SIZE_ENV, value = %val, "Invalid stack size, using default");
                defaults.stack_size
            }),
            None => defaults.stack_size,
        };

        let workers = match lookup(WORKERS_ENV) {
            Some(val) => match val.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    warn!(var = WORKERS_ENV, value = %val, "Invalid worker count, using default");
                    defaults.workers
                }
            },
            None => defaults.workers,
        };

        RuntimeConfig {
            stack_size,
            workers,
        }
    }

    /// Push the settings into the global `may` configuration. Call before starting
    /// the server.
    pub fn apply(&self) {
        may::config()
            .set_stack_size(self.stack_size)
            .set_workers(self.workers);
        info!(
            stack_size = self.stack_size,
            workers = self.workers,
            "Coroutine runtime configured"
        );
    }
}

/// Parse a byte size written in decimal or `0x` hexadecimal.
#[must_use]
pub fn parse_size(val: &str) -> Option<usize> {
    let val = val.trim();
    let parsed = match val.strip_prefix("0x").or_else(|| val.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    };
    parsed.filter(|n| *n > 0)
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("16384"), Some(16384));
        assert_eq!(parse_size("0x8000"), Some(0x8000));
        assert_eq!(parse_size(" 0X10 "), Some(16));
        assert_eq!(parse_size("0"), None);
        assert_eq!(parse_size("big"), None);
        assert_eq!(parse_size("0xZZ"), None);
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = RuntimeConfig::from_lookup(lookup(&[]));
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.stack_size, DEFAULT_STACK_SIZE);
        assert!(config.workers >= 1);
    }

    #[test]
    fn test_values_from_env() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            (STACK_SIZE_ENV, "0x10000"),
            (WORKERS_ENV, "3"),
        ]));
        assert_eq!(config.stack_size, 0x10000);
        assert_eq!(config.workers, 3);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            (STACK_SIZE_ENV, "lots"),
            (WORKERS_ENV, "0"),
        ]));
        assert_eq!(config, RuntimeConfig::default());
    }
}
