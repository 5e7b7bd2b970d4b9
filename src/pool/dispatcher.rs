//! Weighted batch dispatcher.
//!
//! [`WeightedPool::dispatch`] splits a batch into contiguous slices sized by
//! worker weight, posts every slice before awaiting any reply, and writes each
//! reply back at the offsets its slice came from. Output order always matches
//! input order, whatever order the workers finish in.

use super::config::{validate_weights, PoolConfig};
use super::types::WeightedWorker;
use super::worker::ThreadWorker;
use crate::error::{ConfigError, GaError, WorkerError};
use futures::stream::{FuturesUnordered, StreamExt};
use std::ops::Range;
use tracing::debug;

/// A fixed set of weighted workers serving one batch at a time.
///
/// `dispatch` borrows the pool mutably, so a second batch cannot be started
/// while one is in flight.
///
/// # Examples
///
/// ```ignore
/// let config = PoolConfig::default().with_weights(vec![1.0, 3.0]);
/// let mut pool = WeightedPool::spawn(&config, |_| |genes: Vec<Gene>| {
///     genes.iter().map(expensive_fitness).collect::<Vec<f64>>()
/// })?;
/// let scores = pool.dispatch(&population).await?;
/// pool.close().await?;
/// ```
pub struct WeightedPool<T, R> {
    workers: Vec<WeightedWorker<T, R>>,
    weights: Vec<f64>,
    total_weight: f64,
}

impl<T, R> WeightedPool<T, R>
where
    T: Clone + Send + 'static,
    R: Send + 'static,
{
    /// Builds a pool over already running workers.
    pub fn new(workers: Vec<WeightedWorker<T, R>>) -> Result<Self, ConfigError> {
        let weights: Vec<f64> = workers.iter().map(|w| w.weight).collect();
        validate_weights(&weights)?;
        let total_weight = weights.iter().sum();
        Ok(Self {
            workers,
            weights,
            total_weight,
        })
    }

    /// Spawns `config.worker_count()` [`ThreadWorker`]s.
    ///
    /// `factory(i)` builds the evaluation function of worker `i`.
    pub fn spawn<F, E>(config: &PoolConfig, mut factory: F) -> Result<Self, GaError>
    where
        F: FnMut(usize) -> E,
        E: FnMut(Vec<T>) -> Vec<R> + Send + 'static,
    {
        config.validate()?;
        let weights = config.resolved_weights();
        let count = weights.len() * config.overload;

        let mut workers = Vec::with_capacity(count);
        for i in 0..count {
            let worker =
                ThreadWorker::spawn(i, factory(i)).map_err(|e| dispatch_error(i, e))?;
            workers.push(WeightedWorker::new(weights[i % weights.len()], worker));
        }

        debug!(workers = count, overload = config.overload, "pool spawned");
        Ok(Self::new(workers)?)
    }

    /// Sum of all worker weights.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Worker weights in declaration order.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Number of workers.
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    /// Always `false`: a pool has at least one worker.
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Evaluates one batch across the pool.
    ///
    /// Worker `i` receives a copy of the `i`-th slice from [`partition`].
    /// An empty batch returns immediately without contacting any worker.
    ///
    /// # Errors
    ///
    /// [`GaError::Dispatch`] when a worker refuses the batch, drops it, or
    /// replies with the wrong number of outputs. Failed slices are not
    /// retried; replies still outstanding are discarded.
    ///
    /// A worker still busy with a discarded slice keeps running it, and the
    /// next batch's slice queues behind it. A [`ThreadWorker`] holds at most
    /// one queued batch, so if the discarded slice has not been picked up yet
    /// the next post is refused ("a batch is already queued") and that
    /// dispatch fails too.
    pub async fn dispatch(&mut self, inputs: &[T]) -> Result<Vec<R>, GaError> {
        let n = inputs.len();
        if n == 0 {
            return Ok(Vec::new());
        }

        let ranges = partition(&self.weights, self.total_weight, n);
        debug!(batch = n, slices = ranges.len(), "dispatching batch");

        let mut pending = FuturesUnordered::new();
        for (index, (range, entry)) in ranges.into_iter().zip(&mut self.workers).enumerate() {
            let reply = entry
                .worker
                .post(inputs[range.clone()].to_vec())
                .map_err(|e| dispatch_error(index, e))?;
            pending.push(async move { (index, range, reply.await) });
        }

        // One reply per slice, concatenated in slice order at the end.
        let mut replies: Vec<Vec<R>> = Vec::new();
        replies.resize_with(pending.len(), Vec::new);

        while let Some((index, range, reply)) = pending.next().await {
            let reply = reply.map_err(|e| dispatch_error(index, e))?;
            if reply.len() != range.len() {
                return Err(GaError::Dispatch {
                    worker: index,
                    reason: format!(
                        "replied with {} outputs for {} inputs",
                        reply.len(),
                        range.len()
                    ),
                });
            }
            replies[index] = reply;
        }

        Ok(replies.into_iter().flatten().collect())
    }

    /// Terminates every worker, in declaration order.
    pub async fn close(mut self) -> Result<(), GaError> {
        for (index, entry) in self.workers.iter_mut().enumerate() {
            entry
                .worker
                .terminate()
                .await
                .map_err(|e| dispatch_error(index, e))?;
        }
        debug!(workers = self.workers.len(), "pool closed");
        Ok(())
    }
}

/// Splits `0..n` into contiguous slices, one per leading worker.
///
/// Worker `i` gets `ceil(weights[i] / total_weight * n)` items, at least one
/// and clipped at `n`. Partitioning stops once `n` is reached, so trailing workers may get
/// nothing; the last worker, if reached, takes whatever remains.
pub fn partition(weights: &[f64], total_weight: f64, n: usize) -> Vec<Range<usize>> {
    let mut ranges = Vec::with_capacity(weights.len());
    let mut offset = 0;
    for (i, &weight) in weights.iter().enumerate() {
        if offset >= n {
            break;
        }
        let size = if i + 1 == weights.len() {
            n - offset
        } else {
            ((weight / total_weight * n as f64).ceil() as usize).max(1)
        };
        let end = (offset + size).min(n);
        ranges.push(offset..end);
        offset = end;
    }
    ranges
}

fn dispatch_error(worker: usize, e: WorkerError) -> GaError {
    GaError::Dispatch {
        worker,
        reason: e.to_string(),
    }
}
