//! Synchronous island engine.
//!
//! One call to [`Island::evolve`] is one generation:
//! shuffle → pairwise tournament pass → in-place loser replacement.

use super::config::IslandConfig;
use super::population::Population;
use super::select::{best, Best};
use super::types::{Operators, Problem};
use crate::error::{ConfigError, GaError};
use crate::random::{create_rng, RandomSource};
use rand::rngs::StdRng;
use tracing::trace;

/// A steady-state pairwise-tournament GA over a fixed-size population.
///
/// # Usage
///
/// ```ignore
/// let mut island = Island::new(OneMax { n: 60 }, IslandConfig::default().with_seed(42))?;
/// while island.best()?.fitness < 60.0 {
///     island.evolve();
/// }
/// ```
pub struct Island<P: Operators, R: RandomSource = StdRng> {
    problem: P,
    population: Population<P::Gene>,
    mutation_rate: f64,
    rng: R,
    generation: u64,
}

impl<P: Problem> Island<P, StdRng> {
    /// Builds an engine, seeding the generator from `config.seed`.
    pub fn new(problem: P, config: IslandConfig<P::Gene>) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Self::with_rng(problem, config, rng)
    }
}

impl<P: Problem, R: RandomSource> Island<P, R> {
    /// Builds an engine that draws every random decision from `rng`.
    ///
    /// Finalizes the configuration: validates it and pads the population to
    /// its target size.
    pub fn with_rng(
        problem: P,
        config: IslandConfig<P::Gene>,
        mut rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let size = config.resolved_population_size();
        let population = Population::finalize(&problem, config.population, size, &mut rng)?;
        Ok(Self {
            problem,
            population,
            mutation_rate: config.mutation_rate,
            rng,
            generation: 0,
        })
    }

    /// Runs one generation.
    ///
    /// Pairs `(0, 1), (2, 3), ...` of the freshly shuffled population compete.
    /// When the defender beats the challenger, the challenger's slot is
    /// overwritten with a mutant or crossover child of the defender. Otherwise
    /// the pair is left untouched. With an odd size the last slot sits out.
    ///
    /// Panics raised by the problem propagate; the population may then be
    /// partially updated.
    pub fn evolve(&mut self) {
        self.population.shuffle(&mut self.rng);

        let mut replaced = 0usize;
        for defender in self.population.defenders() {
            let (a, b) = self.population.pair(defender);
            if self.problem.does_a_beat_b(a, b) {
                self.population.replace_loser(
                    &self.problem,
                    defender,
                    self.mutation_rate,
                    &mut self.rng,
                );
                replaced += 1;
            }
        }

        self.generation += 1;
        trace!(generation = self.generation, replaced, "generation done");
    }

    /// Runs `generations` generations back to back.
    pub fn evolve_n(&mut self, generations: usize) {
        for _ in 0..generations {
            self.evolve();
        }
    }

    /// The fittest gene, scanning the whole population once.
    ///
    /// Ties resolve to the lowest slot index.
    pub fn best(&self) -> Result<Best<'_, P::Gene>, GaError> {
        best(self.population.as_slice(), |g| self.problem.fitness(g))
    }
}

impl<P: Operators, R: RandomSource> Island<P, R> {
    pub fn population(&self) -> &[P::Gene] {
        self.population.as_slice()
    }

    pub fn population_size(&self) -> usize {
        self.population.len()
    }

    /// Number of completed generations.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Mutable access to the problem, e.g. to swap a fitness cache between
    /// generations. The default competition predicate picks the change up on
    /// its next call.
    pub fn problem_mut(&mut self) -> &mut P {
        &mut self.problem
    }

    pub fn into_population(self) -> Vec<P::Gene> {
        self.population.into_vec()
    }
}

// ============================================================================
// Tests
// ============================================================================
