//! Steady-state pairwise-tournament genetic algorithm.
//!
//! An island holds a fixed-size population and evolves it one generation
//! per call:
//!
//! 1. shuffle the population (Fisher–Yates over the injected random source);
//! 2. pair slots `(0, 1), (2, 3), ...`;
//! 3. where the defender beats the challenger, overwrite the challenger's
//!    slot with a mutant of the defender or a crossover of the defender and
//!    a random partner.
//!
//! Winners are never modified, so with the default `fitness(a) >= fitness(b)`
//! competition the best fitness in the population never decreases.
//!
//! # Core Traits
//!
//! - [`Operators`]: in-place mutation and crossover
//! - [`Problem`] / [`AsyncProblem`]: fitness and competition
//!
//! # Key Types
//!
//! - [`IslandConfig`]: seed population, size, mutation rate, seed
//! - [`Island`] / [`AsyncIsland`]: the engines
//! - [`Best`]: result of a selection scan
//! - [`DiversityRule`]: niche-preserving competition helper

mod async_runner;
mod competition;
mod config;
mod population;
mod runner;
mod select;
mod types;

pub use async_runner::AsyncIsland;
pub use competition::DiversityRule;
pub use config::{IslandConfig, DEFAULT_POPULATION_SIZE};
pub use population::{derive_individual, Population};
pub use runner::Island;
#[cfg(feature = "parallel")]
pub use select::best_par;
pub use select::{best, best_async, best_pooled, max_index, Best};
pub use types::{AsyncProblem, Operators, Problem};
