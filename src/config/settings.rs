//! Configuration loading and validation.
//!
//! # Example
//!
//! ```no_run
//! use gearopt::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("gearopt.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::error::{ConfigError, Result};
use crate::ports::SolverSettings;

/// File read when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "gearopt.toml";

/// Solver defaults, overridable per problem file and per command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Wall-clock limit for one solve, 1 to 1000 seconds.
    pub time_limit_secs: u64,
    /// Engine threads, 1 to 10.
    pub workers: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: SolverSettings::DEFAULT_TIME_LIMIT_SECS,
            workers: SolverSettings::DEFAULT_WORKERS,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Logging and tracing configuration.
    pub logging: LoggingConfig,

    /// Solver limits.
    pub solver: SolverConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is out of range.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "level" }.into());
        }
        self.solver_settings()?;
        Ok(())
    }

    /// Validated solver settings.
    pub fn solver_settings(&self) -> std::result::Result<SolverSettings, ConfigError> {
        SolverSettings::new(self.solver.time_limit_secs, self.solver.workers)
    }

    pub fn init_logging(&self) {
        self.logging.init();
    }
}
