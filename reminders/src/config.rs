//! Configuration loaded from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `MY_PLANTS_SEED_SAMPLES` | `true` |
//! | `MY_PLANTS_REJECT_BLANK_NAMES` | `true` |
//! | `MY_PLANTS_BROADCAST_CAPACITY` | `16` |
//! | `MY_PLANTS_LOG` | `my_plants=info,my_plants_runtime=info` |
//!
//! ```no_run
//! use my_plants::config::ReminderConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ReminderConfig::from_env()?;
//! println!("Seeding samples: {}", config.seed_samples);
//! # Ok(())
//! # }
//! ```

use crate::reducer::ReminderEnvironment;
use my_plants_core::environment::Clock;
use my_plants_runtime::StoreConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

const SEED_SAMPLES: &str = "MY_PLANTS_SEED_SAMPLES";
const REJECT_BLANK_NAMES: &str = "MY_PLANTS_REJECT_BLANK_NAMES";
const BROADCAST_CAPACITY: &str = "MY_PLANTS_BROADCAST_CAPACITY";
const LOG: &str = "MY_PLANTS_LOG";

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable that should hold a boolean doesn't
    #[error("{var} must be a boolean, got {value:?}")]
    InvalidBool {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },

    /// A variable that should hold a number doesn't
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

/// Settings for the reminder store and the demo binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Load the sample plants into an empty checklist on start
    pub seed_samples: bool,
    /// Reject reminders with blank plant names
    pub reject_blank_names: bool,
    /// Actions buffered per store subscriber
    pub broadcast_capacity: usize,
    /// Fallback `tracing` filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            seed_samples: true,
            reject_blank_names: true,
            broadcast_capacity: StoreConfig::default().broadcast_capacity,
            log_filter: "my_plants=info,my_plants_runtime=info".to_string(),
        }
    }
}

impl ReminderConfig {
    /// Load from process environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparsable value or the
    /// result fails [`ReminderConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using `lookup` to read variables; unset variables keep defaults
    ///
    /// # Errors
    ///
    /// Same as [`ReminderConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            seed_samples: lookup(SEED_SAMPLES)
                .map(|v| parse_bool(SEED_SAMPLES, &v))
                .transpose()?
                .unwrap_or(defaults.seed_samples),
            reject_blank_names: lookup(REJECT_BLANK_NAMES)
                .map(|v| parse_bool(REJECT_BLANK_NAMES, &v))
                .transpose()?
                .unwrap_or(defaults.reject_blank_names),
            broadcast_capacity: lookup(BROADCAST_CAPACITY)
                .map(|v| {
                    v.trim().parse::<usize>().map_err(|_| ConfigError::InvalidNumber {
                        var: BROADCAST_CAPACITY,
                        value: v.clone(),
                    })
                })
                .transpose()?
                .unwrap_or(defaults.broadcast_capacity),
            log_filter: lookup(LOG).unwrap_or(defaults.log_filter),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check invariants the types can't express
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.broadcast_capacity == 0 {
            return Err(ConfigError::Validation(format!(
                "{BROADCAST_CAPACITY} must be greater than 0"
            )));
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{LOG} cannot be empty")));
        }
        Ok(())
    }

    /// Runtime settings derived from this configuration
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default().with_broadcast_capacity(self.broadcast_capacity)
    }

    /// Reducer environment derived from this configuration
    #[must_use]
    pub fn environment(&self, clock: Arc<dyn Clock>) -> ReminderEnvironment {
        ReminderEnvironment::new(clock).with_reject_blank_names(self.reject_blank_names)
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ReminderConfig::from_lookup(lookup(&[]));
        assert_eq!(config, Ok(ReminderConfig::default()));

        let defaults = ReminderConfig::default();
        assert!(defaults.seed_samples);
        assert!(defaults.reject_blank_names);
        assert_eq!(defaults.broadcast_capacity, 16);
    }

    #[test]
    fn reads_overrides() {
        let config = ReminderConfig::from_lookup(lookup(&[
            (SEED_SAMPLES, "off"),
            (REJECT_BLANK_NAMES, "FALSE"),
            (BROADCAST_CAPACITY, " 64 "),
            (LOG, "debug"),
        ]));

        assert_eq!(
            config,
            Ok(ReminderConfig {
                seed_samples: false,
                reject_blank_names: false,
                broadcast_capacity: 64,
                log_filter: "debug".to_string(),
            })
        );
    }

    #[test]
    fn rejects_bad_bool() {
        let result = ReminderConfig::from_lookup(lookup(&[(SEED_SAMPLES, "maybe")]));
        assert_eq!(
            result,
            Err(ConfigError::InvalidBool {
                var: SEED_SAMPLES,
                value: "maybe".to_string(),
            })
        );
    }

    #[test]
    fn rejects_bad_number() {
        let result = ReminderConfig::from_lookup(lookup(&[(BROADCAST_CAPACITY, "-1")]));
        assert!(matches!(result, Err(ConfigError::InvalidNumber { .. })));
    }

    #[test]
    fn rejects_zero_capacity() {
        let result = ReminderConfig::from_lookup(lookup(&[(BROADCAST_CAPACITY, "0")]));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn derives_runtime_settings() {
        let config = ReminderConfig {
            broadcast_capacity: 32,
            reject_blank_names: false,
            ..ReminderConfig::default()
        };

        assert_eq!(config.store_config().broadcast_capacity, 32);
        let env = config.environment(Arc::new(my_plants_core::environment::SystemClock));
        assert!(!env.reject_blank_names);
    }
}
