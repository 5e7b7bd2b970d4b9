//! Error types shared by the evolution engine and the worker pool.

use thiserror::Error;

/// A malformed or underspecified configuration.
///
/// Always surfaced at construction time, never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("zero population")]
    ZeroPopulation,

    #[error("missing seed source")]
    MissingSeedSource,

    #[error("empty seed population")]
    EmptySeedPopulation,

    #[error("mutation rate must be a number in [0, 1], got {0}")]
    InvalidMutationRate(f64),

    #[error("require at least 1 worker")]
    NoWorkers,

    #[error("worker {index} has invalid weight {weight}")]
    InvalidWeight { index: usize, weight: f64 },

    #[error("total worker weight {0} is not finite")]
    InvalidTotalWeight(f64),

    #[error("overload must be at least 1")]
    ZeroOverload,
}

/// Errors surfaced by [`Island`](crate::island::Island),
/// [`AsyncIsland`](crate::island::AsyncIsland) and
/// [`WeightedPool`](crate::pool::WeightedPool).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GaError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("empty population")]
    EmptyPopulation,

    #[error("worker {worker} failed: {reason}")]
    Dispatch { worker: usize, reason: String },

    #[error("evaluation failed: {0}")]
    Evaluation(String),
}

/// A failure inside one worker's transport or execution context.
///
/// [`WeightedPool`](crate::pool::WeightedPool) wraps it into
/// [`GaError::Dispatch`] together with the worker's index.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct WorkerError(pub String);
