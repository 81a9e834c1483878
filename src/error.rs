use thiserror::Error;

use crate::domain::{HeroId, ItemId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Roster bookkeeping errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("unknown hero {0}")]
    UnknownHero(HeroId),

    #[error("unknown item {0}")]
    UnknownItem(ItemId),

    #[error("duplicate hero name '{0}'")]
    DuplicateHero(String),

    #[error("duplicate item name '{0}'")]
    DuplicateItem(String),
}

/// Errors raised while validating inputs or building the integer program.
/// Every variant names the hero or item at fault.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelingError {
    #[error("{context}: invalid value for {field}: {reason}")]
    InvalidValue {
        context: String,
        field: String,
        reason: String,
    },

    #[error("{context}: unknown stat '{name}'")]
    UnknownStat { context: String, name: String },

    #[error("{context}: unknown set '{name}'")]
    UnknownSet { context: String, name: String },

    #[error("{context}: unknown item slot '{name}'")]
    UnknownSlot { context: String, name: String },

    #[error("{context}: missing base stat {stat}")]
    MissingBaseStat { context: String, stat: String },

    #[error("{context}: unknown item '{name}'")]
    UnknownItem { context: String, name: String },

    #[error("{context}: item '{item}' does not fit slot {slot}")]
    SlotMismatch {
        context: String,
        item: String,
        slot: String,
    },

    #[error("{context}: {reason}")]
    Malformed { context: String, reason: String },
}

/// Failures inside the integer-programming engine that are not a verdict on
/// the problem itself.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("solver backend error: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Modeling(#[from] ModelingError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
