//! Error types for the directory engine.

use thiserror::Error;

use crate::shop::ShopId;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Recoverable failures reported by directory, table, heap, and graph operations.
///
/// None of these are fatal. The caller decides whether to retry, re-prompt,
/// or surface the error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("shop '{0}' already exists")]
    DuplicateId(ShopId),

    #[error("shop '{0}' does not exist")]
    MissingId(ShopId),

    #[error("node '{0}' is not in the graph")]
    MissingNode(ShopId),

    #[error("edge between '{0}' and '{1}' already exists")]
    DuplicateEdge(ShopId, ShopId),

    #[error("no edge between '{0}' and '{1}'")]
    MissingEdge(ShopId, ShopId),

    #[error("a shop cannot be connected to itself ('{0}')")]
    SelfLoop(ShopId),

    #[error("heap is empty")]
    EmptyHeap,

    #[error("shop identity must not be empty")]
    InvalidIdentity,

    /// Every slot on the key's probe sequence is taken by another key.
    #[error("table full: no free slot for key '{key}' after {probes} probes")]
    TableFull { key: String, probes: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Invalid directory settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {value} not in {min}..={max}")]
    Range {
        field: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    /// The probe step must be relatively prime to the capacity, otherwise
    /// the probe sequence cycles before it has visited every slot.
    #[error("probe_step {step} shares a factor with table_capacity {capacity} (gcd {gcd})")]
    ProbeStepNotCoprime {
        step: usize,
        capacity: usize,
        gcd: usize,
    },

    #[error("TOML parsing error: {0}")]
    Toml(String),
}

/// Failures reading an ingestion dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
