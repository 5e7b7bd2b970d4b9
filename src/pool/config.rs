//! Pool configuration.

use crate::error::ConfigError;
use std::num::NonZeroUsize;

/// Parameters for [`WeightedPool::spawn`](super::WeightedPool::spawn).
///
/// The pool starts `weights.len() × overload` workers; worker `i` gets
/// `weights[i % weights.len()]`.
///
/// ```
/// use ga_island::pool::PoolConfig;
///
/// let config = PoolConfig::default()
///     .with_weights(vec![1.0, 3.0])
///     .with_overload(2);
/// assert_eq!(config.worker_count(), 4);
/// assert_eq!(config.resolved_weights(), vec![1.0, 3.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    /// Relative capacity per worker slot.
    ///
    /// `None` uses [`default_weights`]: one slot of weight 1.0 per hardware
    /// thread.
    pub weights: Option<Vec<f64>>,

    /// How many times to cycle through `weights` when spawning workers.
    pub overload: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            weights: None,
            overload: 1,
        }
    }
}

impl PoolConfig {
    /// Sets explicit per-worker weights.
    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Sets the overload multiplier.
    pub fn with_overload(mut self, overload: usize) -> Self {
        self.overload = overload;
        self
    }

    /// Weights after applying the default.
    pub fn resolved_weights(&self) -> Vec<f64> {
        self.weights.clone().unwrap_or_else(default_weights)
    }

    /// Number of workers [`WeightedPool::spawn`](super::WeightedPool::spawn) will start.
    pub fn worker_count(&self) -> usize {
        self.weights
            .as_ref()
            .map_or_else(|| default_weights().len(), Vec::len)
            * self.overload
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.overload == 0 {
            return Err(ConfigError::ZeroOverload);
        }
        if let Some(weights) = &self.weights {
            validate_weights(weights)?;
        }
        Ok(())
    }
}

/// One weight of 1.0 per available hardware thread.
pub fn default_weights() -> Vec<f64> {
    let n = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    vec![1.0; n]
}

/// Rejects an empty list, any weight that is not finite and positive, and a
/// sum that overflows.
pub(crate) fn validate_weights(weights: &[f64]) -> Result<(), ConfigError> {
    if weights.is_empty() {
        return Err(ConfigError::NoWorkers);
    }
    for (index, &weight) in weights.iter().enumerate() {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ConfigError::InvalidWeight { index, weight });
        }
    }
    let total: f64 = weights.iter().sum();
    if !total.is_finite() {
        return Err(ConfigError::InvalidTotalWeight(total));
    }
    Ok(())
}
