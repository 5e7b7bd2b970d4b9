//! Island-model genetic algorithm with a weighted worker pool.
//!
//! Provides two tightly coupled pieces:
//!
//! - **Island engine** ([`island`]): a steady-state genetic algorithm over a
//!   fixed-size population. Each generation shuffles the population, pairs
//!   neighbours in a tournament and overwrites each beaten challenger in place
//!   with a mutant or crossover child of its defender. A synchronous
//!   [`Island`](island::Island) and a suspending
//!   [`AsyncIsland`](island::AsyncIsland) share the same algorithm.
//! - **Weighted pool** ([`pool`]): fans one batch of fitness evaluations out to
//!   concurrent workers of unequal capacity and joins the results back in
//!   input order.
//!
//! All randomness flows through [`random::RandomSource`], so a fixed seed
//! reproduces a run exactly.
//!
//! # Architecture
//!
//! The engine never looks inside a gene. Problems plug in through the
//! [`island::Operators`] and [`island::Problem`] /
//! [`island::AsyncProblem`] traits; workers plug in through
//! [`pool::Worker`].

pub mod error;
pub mod island;
pub mod pool;
pub mod random;

pub use error::{ConfigError, GaError, WorkerError};
