//! Island configuration.
//!
//! [`IslandConfig`] holds the seed population and the parameters of the
//! tournament pass. It is consumed once when an engine is built; after that
//! the population belongs to the engine.

use crate::error::ConfigError;

/// Population size used when neither a size nor a seed population is given.
pub const DEFAULT_POPULATION_SIZE: usize = 100;

/// Configuration for [`Island`](super::Island) and
/// [`AsyncIsland`](super::AsyncIsland).
///
/// # Defaults
///
/// ```
/// use ga_island::island::IslandConfig;
///
/// let config: IslandConfig<Vec<bool>> = IslandConfig::default();
/// assert!((config.mutation_rate - 0.5).abs() < 1e-12);
/// assert_eq!(config.resolved_population_size(), 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use ga_island::island::IslandConfig;
///
/// let config = IslandConfig::default()
///     .with_population(vec![vec![true; 8]; 10])
///     .with_population_size(50)
///     .with_mutation_rate(0.3)
///     .with_seed(42);
/// assert_eq!(config.resolved_population_size(), 50);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IslandConfig<G> {
    /// Probability of replacing a loser by mutation rather than crossover.
    pub mutation_rate: f64,

    /// Seed population. Padded up to the resolved size at construction.
    pub population: Vec<G>,

    /// Requested population size.
    ///
    /// `None` infers the size from `population`, or uses
    /// [`DEFAULT_POPULATION_SIZE`] when `population` is empty.
    pub population_size: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed. Ignored by
    /// [`Island::with_rng`](super::Island::with_rng).
    pub seed: Option<u64>,
}

impl<G> Default for IslandConfig<G> {
    fn default() -> Self {
        Self {
            mutation_rate: 0.5,
            population: Vec::new(),
            population_size: None,
            seed: None,
        }
    }
}

impl<G> IslandConfig<G> {
    /// Sets the seed population.
    pub fn with_population(mut self, population: Vec<G>) -> Self {
        self.population = population;
        self
    }

    /// Sets the target population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = Some(n);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Size the engine will run with, before widening to fit an oversized
    /// seed population.
    pub fn resolved_population_size(&self) -> usize {
        match self.population_size {
            Some(n) => n,
            None if self.population.is_empty() => DEFAULT_POPULATION_SIZE,
            None => self.population.len(),
        }
    }

    /// Validates the parameters that do not depend on the problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.mutation_rate));
        }
        if self.resolved_population_size() < 1 {
            return Err(ConfigError::ZeroPopulation);
        }
        Ok(())
    }
}
