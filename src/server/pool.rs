//! Fixed-size worker pool.
//!
//! A set of long-lived tokio tasks pull work items off one shared, unbounded
//! queue. Each worker handles one item at a time, to completion, so the pool
//! size bounds how many connections are served at once; everything else
//! waits in the queue.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

pub const MAX_WORKERS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The requested size is zero or larger than [`MAX_WORKERS`].
    InvalidSize(usize),
    /// The queue is closed; the pool is shutting down.
    Closed,
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolError::InvalidSize(n) => {
                write!(f, "worker pool size must be 1..={}, got {}", MAX_WORKERS, n)
            }
            PoolError::Closed => write!(f, "worker pool is shut down"),
        }
    }
}

impl std::error::Error for PoolError {}

/// The only thing the accept loop needs from a pool.
pub trait Submit<T> {
    /// Queues `item`; it runs later on some idle worker.
    fn submit(&self, item: T) -> Result<(), PoolError>;
}

struct Worker {
    id: usize,
    handle: JoinHandle<()>,
}

pub struct WorkerPool<T> {
    sender: mpsc::UnboundedSender<T>,
    workers: Vec<Worker>,
}

impl<T> WorkerPool<T>
where
    T: Send + 'static,
{
    /// Spawns `size` workers, each calling `handler(worker_id, item)` for the
    /// items it takes off the queue. Must be called inside a tokio runtime.
    pub fn start<H, Fut>(size: usize, handler: H) -> Result<Self, PoolError>
    where
        H: Fn(usize, T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if size == 0 || size > MAX_WORKERS {
            return Err(PoolError::InvalidSize(size));
        }

        let (sender, receiver) = mpsc::unbounded_channel();
        let receiver = Arc::new(Mutex::new(receiver));
        let handler = Arc::new(handler);

        let workers = (0..size)
            .map(|id| {
                let receiver = Arc::clone(&receiver);
                let handler = Arc::clone(&handler);
                let handle = tokio::spawn(async move {
                    loop {
                        let item = receiver.lock().await.recv().await;
                        match item {
                            Some(item) => (*handler)(id, item).await,
                            None => {
                                debug!(worker = id, "queue closed, worker exiting");
                                break;
                            }
                        }
                    }
                });
                Worker { id, handle }
            })
            .collect();

        Ok(Self { sender, workers })
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Closes the queue and gives the workers `grace` to finish everything
    /// already queued. Workers still busy after that are aborted, which drops
    /// (and so closes) whatever connection they hold.
    pub async fn shutdown(self, grace: Duration) {
        let Self { sender, mut workers } = self;
        drop(sender);

        let drained = tokio::time::timeout(grace, async {
            for worker in workers.iter_mut() {
                if let Err(e) = (&mut worker.handle).await {
                    error!(worker = worker.id, error = %e, "worker terminated abnormally");
                }
            }
        })
        .await;

        if drained.is_ok() {
            return;
        }

        let stuck: Vec<Worker> = workers
            .into_iter()
            .filter(|w| !w.handle.is_finished())
            .collect();
        for worker in &stuck {
            warn!(worker = worker.id, ?grace, "worker still busy after grace period, aborting");
            worker.handle.abort();
        }
        for worker in stuck {
            if let Err(e) = worker.handle.await {
                if !e.is_cancelled() {
                    error!(worker = worker.id, error = %e, "worker terminated abnormally");
                }
            }
        }
    }
}

impl<T> Submit<T> for WorkerPool<T> {
    fn submit(&self, item: T) -> Result<(), PoolError> {
        self.sender.send(item).map_err(|_| PoolError::Closed)
    }
}
