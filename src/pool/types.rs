//! The worker seam.
//!
//! The pool only ever asks a worker to take a batch, to answer it once, and to
//! stop. How the batch travels (threads, processes, sockets) is up to the
//! [`Worker`] implementation.

use crate::error::WorkerError;
use async_trait::async_trait;
use futures::future::BoxFuture;

/// Resolves with a worker's reply to one batch.
pub type ReplyFuture<R> = BoxFuture<'static, Result<Vec<R>, WorkerError>>;

/// A concurrent unit of execution reachable only by request/reply messages.
///
/// A worker owns copies of the inputs it receives; nothing is shared with the
/// caller. It answers each batch exactly once, with one output per input in
/// input order.
#[async_trait]
pub trait Worker<T, R>: Send {
    /// Hands one batch to the worker.
    ///
    /// Returns immediately; the reply arrives through the returned future.
    fn post(&mut self, batch: Vec<T>) -> Result<ReplyFuture<R>, WorkerError>;

    /// Asks the worker to shut down and waits until it has.
    async fn terminate(&mut self) -> Result<(), WorkerError>;
}

/// A worker paired with its relative capacity.
pub struct WeightedWorker<T, R> {
    /// Relative processing capacity. Must be finite and positive.
    pub weight: f64,
    pub worker: Box<dyn Worker<T, R>>,
}

impl<T, R> WeightedWorker<T, R> {
    pub fn new<W: Worker<T, R> + 'static>(weight: f64, worker: W) -> Self {
        Self {
            weight,
            worker: Box::new(worker),
        }
    }
}
