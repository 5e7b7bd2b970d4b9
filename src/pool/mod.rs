//! Weighted worker pool for expensive fitness evaluation.
//!
//! A [`WeightedPool`] owns a fixed set of long-lived workers, each with a
//! declared capacity weight. One batch at a time is split across them in
//! proportion to weight and the partial replies are joined back in input
//! order.
//!
//! # Key Types
//!
//! - [`Worker`]: the transport seam (post a batch, await the reply, terminate)
//! - [`ThreadWorker`]: a worker backed by one OS thread and tokio channels
//! - [`PoolConfig`]: weights and overload for [`WeightedPool::spawn`]
//! - [`WeightedPool`]: partitioning, fan-out and ordered fan-in
//!
//! Genes cross the worker boundary by value: each worker gets its own copy
//! of its slice.

mod config;
mod dispatcher;
mod types;
mod worker;

pub use config::{default_weights, PoolConfig};
pub use dispatcher::{partition, WeightedPool};
pub use types::{ReplyFuture, WeightedWorker, Worker};
pub use worker::ThreadWorker;
