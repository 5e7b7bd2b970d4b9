//! Asynchronous island engine.
//!
//! Same generation as [`Island`](super::Island), but fitness and competition
//! suspend. Pairs are evaluated strictly one after another: a pair's slots are
//! overwritten before the next pair is read, so no evaluation ever observes a
//! slot mid-write. Suspension happens only inside
//! [`AsyncProblem::does_a_beat_b`]; mutation and crossover run to completion.

use super::config::IslandConfig;
use super::population::Population;
use super::select::{best_async, Best};
use super::types::{AsyncProblem, Operators};
use crate::error::{ConfigError, GaError};
use crate::random::{create_rng, RandomSource};
use rand::rngs::StdRng;
use tracing::trace;

/// Async counterpart of [`Island`](super::Island).
///
/// Scoring through a [`WeightedPool`](crate::pool::WeightedPool): `dispatch`
/// needs `&mut`, so the problem holds the pool behind a `tokio::sync::Mutex`.
///
/// ```ignore
/// struct RemoteScore {
///     pool: tokio::sync::Mutex<WeightedPool<Gene, f64>>,
/// }
///
/// #[async_trait]
/// impl AsyncProblem for RemoteScore {
///     async fn fitness(&self, gene: &Gene) -> Result<f64, GaError> {
///         let mut pool = self.pool.lock().await;
///         Ok(pool.dispatch(std::slice::from_ref(gene)).await?[0])
///     }
/// }
///
/// let mut island = AsyncIsland::new(RemoteScore { pool: Mutex::new(pool) }, config)?;
/// island.evolve().await?;
/// let best = island.best().await?;
/// ```
pub struct AsyncIsland<P: Operators, R: RandomSource = StdRng> {
    problem: P,
    population: Population<P::Gene>,
    mutation_rate: f64,
    rng: R,
    generation: u64,
}

impl<P: AsyncProblem> AsyncIsland<P, StdRng> {
    /// Builds an engine, seeding the generator from `config.seed`.
    pub fn new(problem: P, config: IslandConfig<P::Gene>) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Self::with_rng(problem, config, rng)
    }
}

impl<P: AsyncProblem, R: RandomSource> AsyncIsland<P, R> {
    /// Builds an engine that draws every random decision from `rng`.
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
    /// The first evaluation error aborts the generation and is returned as
    /// is. Pairs already processed keep their new contents and the
    /// generation counter is not advanced.
    pub async fn evolve(&mut self) -> Result<(), GaError> {
        self.population.shuffle(&mut self.rng);

        let mut replaced = 0usize;
        for defender in self.population.defenders() {
            let (a, b) = self.population.pair(defender);
            if self.problem.does_a_beat_b(a, b).await? {
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
        Ok(())
    }

    /// Runs `generations` generations, stopping at the first error.
    pub async fn evolve_n(&mut self, generations: usize) -> Result<(), GaError> {
        for _ in 0..generations {
            self.evolve().await?;
        }
        Ok(())
    }

    /// The fittest gene, awaiting each member's fitness in slot order.
    pub async fn best(&self) -> Result<Best<'_, P::Gene>, GaError> {
        let problem = &self.problem;
        best_async(self.population.as_slice(), |g| problem.fitness(g)).await
    }
}

impl<P: Operators, R: RandomSource> AsyncIsland<P, R> {
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

    pub fn problem_mut(&mut self) -> &mut P {
        &mut self.problem
    }

    pub fn into_population(self) -> Vec<P::Gene> {
        self.population.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::island::best_pooled;
    use crate::pool::{PoolConfig, WeightedPool};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    #[derive(Clone, Debug, PartialEq)]
    struct Bits(Vec<bool>);

    struct OneMax {
        n: usize,
        flip: f64,
        calls: AtomicUsize,
        fail_after: Option<usize>,
    }

    impl OneMax {
        fn new(n: usize) -> Self {
            Self {
                n,
                flip: 0.5,
                calls: AtomicUsize::new(0),
                fail_after: None,
            }
        }
    }

    impl Operators for OneMax {
        type Gene = Bits;

        fn mutate<R: RandomSource>(&self, input: &Bits, output: &mut Bits, rng: &mut R) {
            output.0.clear();
            output
                .0
                .extend(input.0.iter().map(|&b| b ^ rng.random_boolean(self.flip)));
        }

        fn crossover<R: RandomSource>(&self, a: &Bits, b: &Bits, child: &mut Bits, rng: &mut R) {
            child.0.clear();
            child.0.extend(
                a.0.iter()
                    .zip(&b.0)
                    .map(|(&x, &y)| if rng.random_boolean(0.5) { x } else { y }),
            );
        }

        fn random_individual<R: RandomSource>(&self, rng: &mut R) -> Option<Bits> {
            Some(Bits((0..self.n).map(|_| rng.random_boolean(0.5)).collect()))
        }
    }

    #[async_trait]
    impl AsyncProblem for OneMax {
        async fn fitness(&self, gene: &Bits) -> Result<f64, GaError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_after.is_some_and(|limit| call >= limit) {
                return Err(GaError::Evaluation(format!("call {call} refused")));
            }
            tokio::task::yield_now().await;
            Ok(gene.0.iter().filter(|&&b| b).count() as f64)
        }
    }

    /// Scores on a thread pool; every comparison is one batch of two genes.
    struct Remote {
        ops: OneMax,
        pool: Mutex<WeightedPool<Bits, f64>>,
        batches: AtomicUsize,
    }

    impl Operators for Remote {
        type Gene = Bits;
        fn mutate<R: RandomSource>(&self, i: &Bits, o: &mut Bits, rng: &mut R) {
            self.ops.mutate(i, o, rng)
        }
        fn crossover<R: RandomSource>(&self, a: &Bits, b: &Bits, c: &mut Bits, rng: &mut R) {
            self.ops.crossover(a, b, c, rng)
        }
        fn random_individual<R: RandomSource>(&self, rng: &mut R) -> Option<Bits> {
            self.ops.random_individual(rng)
        }
    }

    #[async_trait]
    impl AsyncProblem for Remote {
        async fn fitness(&self, gene: &Bits) -> Result<f64, GaError> {
            let mut pool = self.pool.lock().await;
            let scores = pool.dispatch(std::slice::from_ref(gene)).await?;
            Ok(scores[0])
        }

        async fn does_a_beat_b(&self, a: &Bits, b: &Bits) -> Result<bool, GaError> {
            self.batches.fetch_add(1, Ordering::SeqCst);
            let mut pool = self.pool.lock().await;
            let scores = pool.dispatch(&[a.clone(), b.clone()]).await?;
            Ok(scores[0] >= scores[1])
        }
    }

    fn count_ones(genes: Vec<Bits>) -> Vec<f64> {
        genes
            .iter()
            .map(|g| g.0.iter().filter(|&&b| b).count() as f64)
            .collect()
    }

    #[tokio::test]
    async fn test_evolves_through_weighted_pool() {
        let pool_config = PoolConfig::default().with_weights(vec![1.0, 1.0]);
        let pool = WeightedPool::spawn(&pool_config, |_| count_ones).unwrap();
        let problem = Remote {
            ops: OneMax::new(20),
            pool: Mutex::new(pool),
            batches: AtomicUsize::new(0),
        };
        let config = IslandConfig::default()
            .with_population_size(20)
            .with_seed(13);
        let mut island = AsyncIsland::new(problem, config).unwrap();

        let start = island.best().await.unwrap().fitness;
        island.evolve_n(50).await.unwrap();
        assert_eq!(island.generation(), 50);
        assert_eq!(island.population().len(), 20);
        // 10 pairs per generation, one batch each.
        assert_eq!(island.problem().batches.load(Ordering::SeqCst), 500);

        let end = island.best().await.unwrap();
        assert!(end.fitness >= start);

        let mut pool = island.problem().pool.lock().await;
        let pooled = best_pooled(island.population(), &mut *pool).await.unwrap();
        assert_eq!(pooled.index, end.index);
        assert_eq!(pooled.fitness, end.fitness);
    }

    #[tokio::test]
    async fn test_solves_one_max_async() {
        const LIMIT: u64 = 20_000;
        let config = IslandConfig::default().with_seed(42);
        let mut island = AsyncIsland::new(OneMax::new(60), config).unwrap();
        while island.best().await.unwrap().fitness < 60.0 {
            assert!(island.generation() < LIMIT);
            island.evolve().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_size_invariant_async() {
        let config = IslandConfig::default()
            .with_population_size(11)
            .with_seed(5);
        let mut island = AsyncIsland::new(OneMax::new(12), config).unwrap();
        island.evolve_n(25).await.unwrap();
        assert_eq!(island.population().len(), 11);
        assert_eq!(island.generation(), 25);
    }

    #[tokio::test]
    async fn test_matches_sync_engine_under_seed() {
        // Both engines consume the generator identically, so the same seed
        // must produce the same population.
        use crate::island::{Island, Problem};

        struct Inline(OneMax);

        impl Operators for Inline {
            type Gene = Bits;
            fn mutate<R: RandomSource>(&self, i: &Bits, o: &mut Bits, rng: &mut R) {
                self.0.mutate(i, o, rng)
            }
            fn crossover<R: RandomSource>(&self, a: &Bits, b: &Bits, c: &mut Bits, rng: &mut R) {
                self.0.crossover(a, b, c, rng)
            }
            fn random_individual<R: RandomSource>(&self, rng: &mut R) -> Option<Bits> {
                self.0.random_individual(rng)
            }
        }

        impl Problem for Inline {
            fn fitness(&self, gene: &Bits) -> f64 {
                gene.0.iter().filter(|&&b| b).count() as f64
            }
        }

        let config = || IslandConfig::default().with_population_size(16).with_seed(99);
        let mut sync = Island::new(Inline(OneMax::new(20)), config()).unwrap();
        let mut not_sync = AsyncIsland::new(OneMax::new(20), config()).unwrap();
        sync.evolve_n(10);
        not_sync.evolve_n(10).await.unwrap();
        assert_eq!(sync.into_population(), not_sync.into_population());
    }

    #[tokio::test]
    async fn test_evaluation_error_propagates() {
        let mut problem = OneMax::new(8);
        problem.fail_after = Some(5);
        let config = IslandConfig::default()
            .with_population_size(20)
            .with_seed(1);
        let mut island = AsyncIsland::new(problem, config).unwrap();

        let err = island.evolve().await.unwrap_err();
        assert_eq!(err, GaError::Evaluation("call 5 refused".into()));
        assert_eq!(island.generation(), 0);
        assert_eq!(island.population().len(), 20);
    }
}
