//! Fixed-size worker thread pool.
//!
//! Workers pull boxed jobs from one shared crossbeam channel and run them to
//! completion; the pool never preempts a running job. Shutdown closes the
//! injector, waits for workers within a bounded grace period, and abandons
//! any worker still busy when the budget runs out.

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};

use crate::error::Result;

/// A unit of work executed on a pool worker.
pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;

/// Worker count policy: leave one hardware thread for the main simulation
/// loop, doubled so a burst of pathfinding requests does not serialize,
/// never fewer than two.
pub fn default_worker_count() -> usize {
    let hw = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2);
    (2 * hw.saturating_sub(1)).max(2)
}

pub(crate) struct WorkerPool {
    injector: Option<Sender<Job>>,
    done_rx: Receiver<usize>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `size` workers.
    pub fn new(size: usize) -> Result<Self> {
        let (injector, feed) = crossbeam_channel::unbounded::<Job>();
        let (done_tx, done_rx) = crossbeam_channel::unbounded::<usize>();

        let mut workers = Vec::with_capacity(size);
        for i in 0..size {
            let feed = feed.clone();
            let done_tx = done_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("marga-worker-{i}"))
                .spawn(move || {
                    while let Ok(job) = feed.recv() {
                        job();
                    }
                    let _ = done_tx.send(i);
                })?;
            workers.push(handle);
        }
        tracing::debug!(workers = size, "worker pool started");

        Ok(Self {
            injector: Some(injector),
            done_rx,
            workers,
        })
    }

    /// Number of workers
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Queue a job for execution.
    pub fn execute(&self, job: Job) {
        if let Some(injector) = &self.injector {
            if injector.send(job).is_err() {
                tracing::warn!("job dropped: worker pool is shutting down");
            }
        }
    }

    /// Shut the pool down, waiting up to `grace` for workers to finish.
    ///
    /// Returns `true` when every worker exited within the budget. Workers
    /// still busy afterwards are abandoned, not force-killed; their handles
    /// are dropped and they finish (or not) in the background.
    pub fn shutdown(mut self, grace: Duration) -> bool {
        // Closing the injector lets workers drain remaining jobs and exit.
        self.injector = None;

        let deadline = Instant::now() + grace;
        let mut exited = 0;
        while exited < self.workers.len() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.done_rx.recv_timeout(remaining) {
                Ok(_) => exited += 1,
                Err(_) => break,
            }
        }

        if exited == self.workers.len() {
            for handle in self.workers.drain(..) {
                let _ = handle.join();
            }
            tracing::debug!("worker pool shut down cleanly");
            true
        } else {
            let abandoned = self.workers.len() - exited;
            tracing::warn!(abandoned, "worker pool shutdown grace period expired");
            false
        }
    }
}
