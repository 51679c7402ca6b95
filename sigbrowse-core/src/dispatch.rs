//! Fixed-size worker pool that runs every loaded signature.
//!
//! The producer pushes signature-table keys through a closable channel
//! shared by all workers. A worker takes one key at a time and runs that
//! signature's checks in file order, so checks of one signature never
//! interleave while different signatures run side by side. Closing the
//! channel is the workers' only stop signal; the join on the worker set is
//! the only barrier.

use crate::check::CheckExecutor;
use crate::error::{ReconError, Result};
use crate::signature::SignatureTable;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

pub const DEFAULT_WORKERS: usize = 20;

/// Called with `(worker_id, signature_id)` when a worker picks up a signature.
pub type ProgressCallback = Arc<dyn Fn(usize, &str) + Send + Sync>;

type WorkQueue = Arc<Mutex<mpsc::Receiver<PathBuf>>>;

/// Totals for a finished dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub signatures: usize,
    pub checks: usize,
    pub opened: usize,
    pub unknown_checks: usize,
    /// Note and unknown-type lines printed during the run, per worker in order
    pub messages: Vec<String>,
}

impl DispatchSummary {
    fn merge(&mut self, other: DispatchSummary) {
        self.signatures += other.signatures;
        self.checks += other.checks;
        self.opened += other.opened;
        self.unknown_checks += other.unknown_checks;
        self.messages.extend(other.messages);
    }
}

pub struct Dispatcher {
    executor: CheckExecutor,
    workers: usize,
    progress_callback: Option<ProgressCallback>,
}

impl Dispatcher {
    pub fn new(executor: CheckExecutor) -> Self {
        Self {
            executor,
            workers: DEFAULT_WORKERS,
            progress_callback: None,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run every check of every signature in `table` exactly once.
    ///
    /// Returns as soon as any worker fails (a launch failure); the remaining
    /// workers and the producer are aborted.
    pub async fn run(&self, table: Arc<SignatureTable>) -> Result<DispatchSummary> {
        if self.workers == 0 {
            return Err(ReconError::Config(
                "max threads must be at least 1".to_string(),
            ));
        }

        // Capacity 1 keeps the producer at most one key ahead of the pool.
        let (tx, rx) = mpsc::channel::<PathBuf>(1);
        let queue: WorkQueue = Arc::new(Mutex::new(rx));

        let mut workers = JoinSet::new();
        for worker_id in 0..self.workers {
            debug!(
                "Launching worker {} on domain: {}, company: {}",
                worker_id,
                self.executor.target().domain,
                self.executor.target().company
            );
            workers.spawn(run_worker(
                worker_id,
                queue.clone(),
                table.clone(),
                self.executor.clone(),
                self.progress_callback.clone(),
            ));
        }
        drop(queue);

        let keys: Vec<PathBuf> = table.keys().cloned().collect();
        let producer = tokio::spawn(async move {
            for key in keys {
                if tx.send(key).await.is_err() {
                    break;
                }
            }
            // tx dropped here: the queue closes once drained
        });

        let mut summary = DispatchSummary::default();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Ok(stats)) => summary.merge(stats),
                Ok(Err(e)) => {
                    workers.abort_all();
                    producer.abort();
                    return Err(e);
                }
                Err(e) => {
                    workers.abort_all();
                    producer.abort();
                    return Err(ReconError::Join(e));
                }
            }
        }
        producer.await?;

        info!(
            "Dispatch complete: {} signatures, {} checks, {} URLs opened",
            summary.signatures, summary.checks, summary.opened
        );
        Ok(summary)
    }
}

async fn run_worker(
    worker_id: usize,
    queue: WorkQueue,
    table: Arc<SignatureTable>,
    executor: CheckExecutor,
    progress_callback: Option<ProgressCallback>,
) -> Result<DispatchSummary> {
    debug!("Worker {} started", worker_id);
    let mut stats = DispatchSummary::default();

    loop {
        // Lock released before the checks run so other workers can dequeue.
        let next = { queue.lock().await.recv().await };
        let Some(path) = next else {
            break;
        };

        let Some(signature) = table.get(&path) else {
            warn!("No signature loaded for {}", path.display());
            continue;
        };

        if let Some(ref callback) = progress_callback {
            callback(worker_id, &signature.id);
        }

        for check in &signature.checks {
            let outcome = executor.perform_check(&signature.id, check)?;
            stats.checks += 1;
            stats.opened += outcome.opened.len();
            if outcome.unknown_type.is_some() {
                stats.unknown_checks += 1;
            }
            stats.messages.extend(outcome.messages);
        }
        stats.signatures += 1;
    }

    debug!("Worker {} exiting", worker_id);
    Ok(stats)
}
