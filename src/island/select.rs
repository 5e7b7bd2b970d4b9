//! Read-only selection over a population.
//!
//! All helpers return the first maximum: ties resolve to the lowest index.

use crate::error::GaError;
use crate::pool::WeightedPool;
use std::future::Future;

/// The fittest member of a population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Best<'a, G> {
    pub gene: &'a G,
    pub fitness: f64,
    /// Slot index of `gene` in the scanned population.
    pub index: usize,
}

/// Index of the first maximum score, or `None` for an empty slice.
///
/// NaN scores never win.
pub fn max_index(scores: &[f64]) -> Option<usize> {
    let mut iter = scores.iter().enumerate();
    let (mut best_idx, mut best) = iter.next().map(|(i, &s)| (i, s))?;
    for (i, &s) in iter {
        if s > best || best.is_nan() {
            best_idx = i;
            best = s;
        }
    }
    Some(best_idx)
}

/// Scans `population` once with `fitness` and returns the first maximum.
pub fn best<G, F>(population: &[G], mut fitness: F) -> Result<Best<'_, G>, GaError>
where
    F: FnMut(&G) -> f64,
{
    let scores: Vec<f64> = population.iter().map(&mut fitness).collect();
    pick(population, &scores)
}

/// Like [`best`], awaiting each score in slot order.
pub async fn best_async<'a, G, F, Fut>(
    population: &'a [G],
    mut fitness: F,
) -> Result<Best<'a, G>, GaError>
where
    F: FnMut(&'a G) -> Fut,
    Fut: Future<Output = Result<f64, GaError>>,
{
    let mut scores = Vec::with_capacity(population.len());
    for gene in population {
        scores.push(fitness(gene).await?);
    }
    pick(population, &scores)
}

/// Scores the whole population as one batch through `pool` and returns the
/// first maximum.
pub async fn best_pooled<'a, G>(
    population: &'a [G],
    pool: &mut WeightedPool<G, f64>,
) -> Result<Best<'a, G>, GaError>
where
    G: Clone + Send + 'static,
{
    let scores = pool.dispatch(population).await?;
    pick(population, &scores)
}

/// Parallel [`best`] over a thread-safe fitness function.
#[cfg(feature = "parallel")]
pub fn best_par<G, F>(population: &[G], fitness: F) -> Result<Best<'_, G>, GaError>
where
    G: Sync,
    F: Fn(&G) -> f64 + Sync + Send,
{
    use rayon::prelude::*;

    let scores: Vec<f64> = population.par_iter().map(fitness).collect();
    pick(population, &scores)
}

fn pick<'a, G>(population: &'a [G], scores: &[f64]) -> Result<Best<'a, G>, GaError> {
    let index = max_index(scores).ok_or(GaError::EmptyPopulation)?;
    Ok(Best {
        gene: &population[index],
        fitness: scores[index],
        index,
    })
}
