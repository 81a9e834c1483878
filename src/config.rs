//! Application configuration.
//!
//! Settings live in an optional `gearopt.toml` with `[logging]` and
//! `[solver]` tables. Every field has a default, so an empty or missing file
//! is a valid configuration.

mod logging;
mod settings;

pub use logging::{LogFormat, LoggingConfig};
pub use settings::{Config, SolverConfig, DEFAULT_CONFIG_PATH};
