//! Directory settings.
//!
//! Every setting has a compiled-in default and a validated range. Settings
//! can be read from TOML:
//!
//! ```toml
//! table_capacity = 1000
//! probe_step = 7
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::table;

pub const DEFAULT_TABLE_CAPACITY: usize = 1000;

/// Relatively prime to the default capacity.
pub const DEFAULT_PROBE_STEP: usize = 7;

pub const MAX_TABLE_CAPACITY: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectoryConfig {
    /// Slots in the category table. Fixed for the directory's lifetime;
    /// size it well above the expected number of distinct categories.
    pub table_capacity: usize,
    /// Double-hashing increment. Must be relatively prime to `table_capacity`.
    pub probe_step: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            table_capacity: DEFAULT_TABLE_CAPACITY,
            probe_step: DEFAULT_PROBE_STEP,
        }
    }
}

impl DirectoryConfig {
    /// Parse and validate settings from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("table_capacity", self.table_capacity, 1, MAX_TABLE_CAPACITY)?;
        check_range("probe_step", self.probe_step, 1, MAX_TABLE_CAPACITY)?;
        table::check_shape(self.table_capacity, self.probe_step)
    }
}

fn check_range(field: &'static str, value: usize, min: usize, max: usize) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::Range {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
