//! Fixed-length population storage and configuration finalization.
//!
//! A [`Population`] is created once by [`Population::finalize`] and never
//! changes length afterwards. Generations reorder it in place and overwrite
//! loser slots in place; no slot is reallocated.

use super::types::Operators;
use crate::error::ConfigError;
use crate::random::{random_element, shuffle, RandomSource};
use std::iter::StepBy;
use std::ops::Range;
use tracing::debug;

/// The ordered, fixed-length set of gene slots owned by an engine.
#[derive(Debug, Clone)]
pub struct Population<G> {
    slots: Vec<G>,
}

impl<G: Clone> Population<G> {
    /// Builds the population from a seed list and a target size.
    ///
    /// - `size < 1` fails with [`ConfigError::ZeroPopulation`].
    /// - A seed list longer than `size` is kept whole; the size widens to fit.
    /// - Missing slots are filled from [`Operators::random_individual`], or,
    ///   when the problem cannot create individuals, by mutating a randomly
    ///   sampled seed member. With neither available the call fails with
    ///   [`ConfigError::MissingSeedSource`].
    pub fn finalize<O, R>(
        ops: &O,
        seed: Vec<G>,
        size: usize,
        rng: &mut R,
    ) -> Result<Self, ConfigError>
    where
        O: Operators<Gene = G>,
        R: RandomSource,
    {
        if size < 1 {
            return Err(ConfigError::ZeroPopulation);
        }

        let mut slots = seed;
        let seeded = slots.len();
        let target = size.max(seeded);
        slots.reserve_exact(target - seeded);

        while slots.len() < target {
            let gene = match ops.random_individual(rng) {
                Some(gene) => gene,
                None if slots.is_empty() => return Err(ConfigError::MissingSeedSource),
                None => derive_individual(ops, &slots, rng)?,
            };
            slots.push(gene);
        }

        debug!(
            requested = size,
            seeded,
            padded = target - seeded,
            "population finalized"
        );
        Ok(Self { slots })
    }
}

impl<G> Population<G> {
    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false` for a finalized population.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn as_slice(&self) -> &[G] {
        &self.slots
    }

    pub fn into_vec(self) -> Vec<G> {
        self.slots
    }

    /// Randomizes slot order with an unbiased Fisher–Yates pass.
    pub(crate) fn shuffle<R: RandomSource>(&mut self, rng: &mut R) {
        shuffle(&mut self.slots, rng);
    }

    /// Defender indices of the tournament pass: `0, 2, 4, ...` while a
    /// challenger exists at `i + 1`. An odd trailing slot is never paired.
    pub(crate) fn defenders(&self) -> StepBy<Range<usize>> {
        (0..self.slots.len().saturating_sub(1)).step_by(2)
    }

    /// The `(defender, challenger)` pair starting at `defender`.
    pub(crate) fn pair(&self, defender: usize) -> (&G, &G) {
        (&self.slots[defender], &self.slots[defender + 1])
    }

    /// Overwrites the challenger slot at `defender + 1`.
    ///
    /// With probability `mutation_rate` the challenger becomes a mutant of the
    /// defender; otherwise it becomes a crossover of the defender and a random
    /// partner drawn from the current population, excluding the slot being
    /// written.
    pub(crate) fn replace_loser<O, R>(
        &mut self,
        ops: &O,
        defender: usize,
        mutation_rate: f64,
        rng: &mut R,
    ) where
        O: Operators<Gene = G>,
        R: RandomSource,
    {
        let challenger = defender + 1;
        if rng.random_boolean(mutation_rate) {
            let (parent, _, child) = split_out(&mut self.slots, defender, defender, challenger);
            ops.mutate(parent, child, rng);
        } else {
            let partner = pick_partner(self.slots.len(), challenger, rng);
            let (parent_a, parent_b, child) =
                split_out(&mut self.slots, defender, partner, challenger);
            ops.crossover(parent_a, parent_b, child, rng);
        }
    }
}

/// Creates an individual by mutating a uniformly sampled member of `population`.
///
/// This is the fallback generator for problems that return `None` from
/// [`Operators::random_individual`].
pub fn derive_individual<O, R>(
    ops: &O,
    population: &[O::Gene],
    rng: &mut R,
) -> Result<O::Gene, ConfigError>
where
    O: Operators,
    R: RandomSource,
{
    let parent = random_element(population, rng).ok_or(ConfigError::EmptySeedPopulation)?;
    let mut child = parent.clone();
    ops.mutate(parent, &mut child, rng);
    Ok(child)
}

/// Uniform index in `0..len`, skipping `excluded`. Requires `len >= 2`.
fn pick_partner<R: RandomSource>(len: usize, excluded: usize, rng: &mut R) -> usize {
    let k = rng.random_index(len - 1);
    if k >= excluded {
        k + 1
    } else {
        k
    }
}

/// Borrows two read slots and one distinct write slot.
///
/// `a` and `b` may coincide; neither may equal `out`.
fn split_out<G>(slots: &mut [G], a: usize, b: usize, out: usize) -> (&G, &G, &mut G) {
    debug_assert!(a != out && b != out, "read slot aliases write slot");
    let (head, tail) = slots.split_at_mut(out);
    let (slot, after) = tail.split_at_mut(1);
    let (head, after) = (&*head, &*after);
    (
        around(head, after, a),
        around(head, after, b),
        &mut slot[0],
    )
}

/// Index into the slots on either side of a split-off write slot.
fn around<'a, G>(head: &'a [G], after: &'a [G], i: usize) -> &'a G {
    if i < head.len() {
        &head[i]
    } else {
        &after[i - head.len() - 1]
    }
}
