//! Core trait definitions for the island engines.
//!
//! The engine never looks inside a gene. Everything it does to one goes
//! through these traits:
//!
//! - [`Operators`]: in-place mutation and crossover, optional generation
//!   from scratch. Shared by both engines.
//! - [`Problem`]: synchronous fitness and competition, used by
//!   [`Island`](super::Island).
//! - [`AsyncProblem`]: suspending fitness and competition, used by
//!   [`AsyncIsland`](super::AsyncIsland).

use crate::error::GaError;
use crate::random::RandomSource;
use async_trait::async_trait;

/// In-place genetic operators for one gene type.
///
/// Both operators write into an existing slot instead of returning a new
/// gene, so a loser's storage is reused by its replacement and a generation
/// allocates nothing on its own.
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct Bits(Vec<bool>);
///
/// impl Operators for OneMax {
///     type Gene = Bits;
///
///     fn mutate<R: RandomSource>(&self, input: &Bits, output: &mut Bits, rng: &mut R) {
///         output.0.clear();
///         output.0.extend(input.0.iter().map(|&b| b ^ rng.random_boolean(0.5)));
///     }
///
///     fn crossover<R: RandomSource>(&self, a: &Bits, b: &Bits, child: &mut Bits, rng: &mut R) {
///         child.0.clear();
///         child.0.extend(a.0.iter().zip(&b.0).map(|(&x, &y)| if rng.random_boolean(0.5) { x } else { y }));
///     }
/// }
/// ```
///
/// No thread-safety bounds apply here, so a synchronous problem may keep
/// `RefCell` or `Cell` state such as a fitness cache.
pub trait Operators {
    /// The candidate solution type.
    type Gene: Clone;

    /// Overwrites `output` with a mutated copy of `input`.
    fn mutate<R: RandomSource>(&self, input: &Self::Gene, output: &mut Self::Gene, rng: &mut R);

    /// Overwrites `child` with a combination of `parent_a` and `parent_b`.
    fn crossover<R: RandomSource>(
        &self,
        parent_a: &Self::Gene,
        parent_b: &Self::Gene,
        child: &mut Self::Gene,
        rng: &mut R,
    );

    /// Creates a fresh individual.
    ///
    /// Return `None` when the problem cannot build individuals from scratch.
    /// The engine then derives new individuals by mutating randomly sampled
    /// members of the seed population.
    fn random_individual<R: RandomSource>(&self, _rng: &mut R) -> Option<Self::Gene> {
        None
    }
}

/// A problem whose fitness is cheap enough to compute inline.
pub trait Problem: Operators {
    /// Scores a gene. Higher is better.
    fn fitness(&self, gene: &Self::Gene) -> f64;

    /// Decides whether `a` beats `b`, in which case `b`'s slot is overwritten.
    ///
    /// The default calls [`fitness`](Problem::fitness) through `self` on every
    /// call, so it always reflects the problem's current state.
    fn does_a_beat_b(&self, a: &Self::Gene, b: &Self::Gene) -> bool {
        self.fitness(a) >= self.fitness(b)
    }
}

/// A problem whose fitness suspends, e.g. because it is computed remotely.
///
/// Suspended evaluations may move across threads, so the problem and its
/// genes must be `Send + Sync`.
///
/// Errors returned here propagate unchanged out of
/// [`AsyncIsland::evolve`](super::AsyncIsland::evolve).
#[async_trait]
pub trait AsyncProblem: Operators<Gene: Send + Sync> + Send + Sync {
    /// Scores a gene. Higher is better.
    async fn fitness(&self, gene: &Self::Gene) -> Result<f64, GaError>;

    /// Decides whether `a` beats `b`. Defaults to `fitness(a) >= fitness(b)`.
    async fn does_a_beat_b(&self, a: &Self::Gene, b: &Self::Gene) -> Result<bool, GaError> {
        Ok(self.fitness(a).await? >= self.fitness(b).await?)
    }
}
