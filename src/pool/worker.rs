//! Thread-backed worker.
//!
//! Each [`ThreadWorker`] owns one OS thread that blocks on its inbox and runs
//! the evaluation function batch by batch. The inbox holds at most one batch,
//! replies travel back over a oneshot channel, and a `Stop` message ends the
//! thread.

use super::types::{ReplyFuture, Worker};
use crate::error::WorkerError;
use async_trait::async_trait;
use futures::FutureExt;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

enum Message<T, R> {
    Batch {
        inputs: Vec<T>,
        reply: oneshot::Sender<Vec<R>>,
    },
    Stop,
}

/// A [`Worker`] running an evaluation function on a dedicated thread.
pub struct ThreadWorker<T, R> {
    id: usize,
    inbox: mpsc::Sender<Message<T, R>>,
    exited: Option<oneshot::Receiver<()>>,
}

impl<T, R> ThreadWorker<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
{
    /// Starts a worker thread running `eval` on every batch it receives.
    ///
    /// `eval` must return one output per input, in input order.
    pub fn spawn<F>(id: usize, mut eval: F) -> Result<Self, WorkerError>
    where
        F: FnMut(Vec<T>) -> Vec<R> + Send + 'static,
    {
        let (inbox, mut rx) = mpsc::channel::<Message<T, R>>(1);
        let (exit_tx, exit_rx) = oneshot::channel();

        std::thread::Builder::new()
            .name(format!("ga-worker-{id}"))
            .spawn(move || {
                while let Some(message) = rx.blocking_recv() {
                    match message {
                        Message::Batch { inputs, reply } => {
                            // The dispatcher may have given up on this batch.
                            let _ = reply.send(eval(inputs));
                        }
                        Message::Stop => break,
                    }
                }
                // Close the inbox before acknowledging, so posts after
                // `terminate` fail instead of queueing.
                drop(rx);
                let _ = exit_tx.send(());
            })
            .map_err(|e| WorkerError(format!("failed to spawn thread: {e}")))?;

        debug!(worker = id, "worker started");
        Ok(Self {
            id,
            inbox,
            exited: Some(exit_rx),
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }
}

#[async_trait]
impl<T, R> Worker<T, R> for ThreadWorker<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
{
    fn post(&mut self, batch: Vec<T>) -> Result<ReplyFuture<R>, WorkerError> {
        let (reply, rx) = oneshot::channel();
        self.inbox
            .try_send(Message::Batch {
                inputs: batch,
                reply,
            })
            .map_err(|e| match e {
                TrySendError::Full(_) => WorkerError("a batch is already queued".into()),
                TrySendError::Closed(_) => WorkerError("worker has exited".into()),
            })?;
        Ok(rx
            .map(|r| r.map_err(|_| WorkerError("worker dropped the batch".into())))
            .boxed())
    }

    async fn terminate(&mut self) -> Result<(), WorkerError> {
        // A closed inbox means the thread is already gone.
        let _ = self.inbox.send(Message::Stop).await;
        if let Some(exited) = self.exited.take() {
            let _ = exited.await;
        }
        debug!(worker = self.id, "worker stopped");
        Ok(())
    }
}
