//! Task orchestration: submission, tracking, drain, and context reset.
//!
//! The orchestrator owns the worker pool and a pending set of tracked task
//! handles. The main loop drives it:
//!
//! - [`TaskOrchestrator::tick`] once per update with elapsed simulated time;
//!   roughly once per second it runs a drain pass that delivers completed
//!   tracked outcomes (events or path callbacks)
//! - [`TaskOrchestrator::drain_and_block`] before a synchronous save or exit
//! - [`TaskOrchestrator::reset_for_new_context`] on world load: the pending
//!   set is discarded so stale results referencing a torn-down world never
//!   reach consumers, and the pool is rebuilt
//!
//! The pending set is the only structure touched from more than one thread
//! (submissions enqueue, the drain inspects); everything else is owned by
//! the main loop.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::Sender;

use crate::core::{AgentId, RequestId, WorldPos};
use crate::error::{Result, TaskError};
use crate::events::{EngineEvent, TaskPayload};
use crate::grid::NavGrid;
use crate::path::find_path;

use super::handle::{TaskHandle, TaskPoll};
use super::pool::{default_worker_count, WorkerPool};

/// Orchestrator sizing and cadence settings.
#[derive(Clone, Debug)]
pub struct OrchestratorConfig {
    /// Worker pool size; defaults to the hardware-derived policy
    pub worker_count: usize,
    /// Simulated seconds between periodic drain passes
    pub drain_interval: f32,
    /// Grace period for pool shutdown during reset
    pub shutdown_grace: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            worker_count: default_worker_count(),
            drain_interval: 1.0,
            shutdown_grace: Duration::from_secs(2),
        }
    }
}

/// Worker pool lifecycle state.
///
/// `Draining` is only entered inside [`TaskOrchestrator::reset_for_new_context`],
/// which blocks for at most the shutdown grace period before the pool is
/// rebuilt and the state returns to `Running`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolState {
    Running,
    Draining,
    Stopped,
}

/// An asynchronous pathfinding request.
///
/// The callback is invoked exactly once, on the drain cycle that observes
/// completion, with the computed waypoints (possibly empty) and the caller's
/// correlation id. After a context reset it is never invoked.
pub struct PathRequest {
    pub origin: WorldPos,
    pub destination: WorldPos,
    pub agent: AgentId,
    pub id: RequestId,
    pub callback: Box<dyn FnOnce(Vec<WorldPos>, RequestId) + Send + 'static>,
}

/// How a tracked task's outcome is delivered at drain time.
enum Delivery {
    /// Dispatch an [`EngineEvent`] on the engine event channel
    Event,
    /// Invoke a pathfinding callback with the waypoint payload
    PathCallback {
        id: RequestId,
        callback: Box<dyn FnOnce(Vec<WorldPos>, RequestId) + Send + 'static>,
    },
}

/// A submitted task whose completion the orchestrator watches.
struct TrackedTask {
    label: String,
    handle: TaskHandle<std::result::Result<TaskPayload, TaskError>>,
    delivery: Delivery,
}

/// Fixed-size worker pool plus the registry of in-flight tracked tasks.
pub struct TaskOrchestrator {
    pool: Option<WorkerPool>,
    state: PoolState,
    pending: Arc<Mutex<Vec<TrackedTask>>>,
    events: Sender<EngineEvent>,
    config: OrchestratorConfig,
    since_drain: f32,
}

impl TaskOrchestrator {
    /// Create an orchestrator and spawn its worker pool.
    pub fn new(config: OrchestratorConfig, events: Sender<EngineEvent>) -> Result<Self> {
        let pool = WorkerPool::new(config.worker_count)?;
        Ok(Self {
            pool: Some(pool),
            state: PoolState::Running,
            pending: Arc::new(Mutex::new(Vec::new())),
            events,
            config,
            since_drain: 0.0,
        })
    }

    /// Current pool lifecycle state
    pub fn state(&self) -> PoolState {
        self.state
    }

    /// Number of workers in the pool
    pub fn worker_count(&self) -> usize {
        self.pool.as_ref().map(|p| p.size()).unwrap_or(0)
    }

    /// Number of tracked tasks not yet drained
    pub fn pending_count(&self) -> usize {
        match self.pending.lock() {
            Ok(pending) => pending.len(),
            Err(_) => 0,
        }
    }

    /// Run `work` on the pool with no completion bookkeeping.
    ///
    /// The caller owns the returned handle and is solely responsible for
    /// polling or awaiting it.
    pub fn submit_untracked<T, F>(&self, work: F) -> TaskHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (job, handle) = TaskHandle::package(work);
        match &self.pool {
            Some(pool) => pool.execute(job),
            // Dropping the job leaves the handle permanently Gone.
            None => tracing::warn!("untracked task dropped: pool is not running"),
        }
        handle
    }

    /// Run `work` on the pool and watch it until a drain pass delivers its
    /// outcome: success as [`EngineEvent::TaskCompleted`], failure (including
    /// a panic) as [`EngineEvent::TaskFailed`].
    pub fn submit_tracked<F>(&self, label: &str, work: F)
    where
        F: FnOnce() -> std::result::Result<TaskPayload, TaskError> + Send + 'static,
    {
        self.submit_with_delivery(label, work, Delivery::Event);
    }

    /// Submit a pathfinding request against a shared read-only grid.
    ///
    /// The search runs entirely on one worker; the request's callback fires
    /// on the drain cycle that observes completion.
    pub fn request_path<G>(&self, request: PathRequest, grid: Arc<G>)
    where
        G: NavGrid + Send + Sync + 'static,
    {
        let PathRequest {
            origin,
            destination,
            agent,
            id,
            callback,
        } = request;

        let work = move || {
            let waypoints = find_path(origin, destination, grid.as_ref(), agent);
            Ok(TaskPayload::Waypoints(waypoints))
        };
        self.submit_with_delivery("pathfind", work, Delivery::PathCallback { id, callback });
    }

    fn submit_with_delivery<F>(&self, label: &str, work: F, delivery: Delivery)
    where
        F: FnOnce() -> std::result::Result<TaskPayload, TaskError> + Send + 'static,
    {
        // Map panics to a typed failure before the handle layer sees them,
        // so tracked tasks always surface through the error event path.
        let guarded = move || match panic::catch_unwind(AssertUnwindSafe(work)) {
            Ok(outcome) => outcome,
            Err(payload) => Err(TaskError::Panicked(panic_message(payload))),
        };

        let (job, handle) = TaskHandle::package(guarded);
        let task = TrackedTask {
            label: label.to_string(),
            handle,
            delivery,
        };

        match &self.pool {
            Some(pool) => {
                if let Ok(mut pending) = self.pending.lock() {
                    pending.push(task);
                }
                pool.execute(job);
            }
            None => tracing::warn!(label, "tracked task dropped: pool is not running"),
        }
    }

    /// Advance simulated time; runs a drain pass once per drain interval.
    pub fn tick(&mut self, elapsed: f32) {
        self.since_drain += elapsed;
        if self.since_drain >= self.config.drain_interval {
            self.since_drain = 0.0;
            self.drain();
        }
    }

    /// Inspect every tracked handle once and deliver completed outcomes.
    ///
    /// Non-blocking: tasks still running stay in the pending set. One
    /// failing task is reported and forgotten; it never affects the others
    /// or the drain loop itself.
    pub fn drain(&mut self) {
        let drained = {
            let Ok(mut pending) = self.pending.lock() else {
                tracing::error!("pending set lock poisoned; skipping drain");
                return;
            };
            std::mem::take(&mut *pending)
        };

        let mut keep = Vec::with_capacity(drained.len());
        for task in drained {
            match task.handle.try_take() {
                TaskPoll::Pending => keep.push(task),
                TaskPoll::Ready(outcome) => self.deliver(task.label, task.delivery, outcome),
                // Cancelled or lost to a pool teardown: dropped silently.
                TaskPoll::Gone => {
                    tracing::trace!(label = %task.label, "tracked task vanished before delivery");
                }
            }
        }

        if let Ok(mut pending) = self.pending.lock() {
            // Tasks submitted during delivery callbacks land behind the survivors.
            keep.append(&mut *pending);
            *pending = keep;
        }
    }

    /// Force a drain, then block until every remaining tracked task has
    /// completed and been delivered. Failures are logged, never propagated.
    /// Used before a blocking save or process exit.
    pub fn drain_and_block(&mut self) {
        self.drain();
        loop {
            let remaining = {
                let Ok(mut pending) = self.pending.lock() else {
                    tracing::error!("pending set lock poisoned; aborting blocking drain");
                    return;
                };
                std::mem::take(&mut *pending)
            };
            if remaining.is_empty() {
                break;
            }
            for task in remaining {
                match task.handle.wait() {
                    Some(outcome) => self.deliver(task.label, task.delivery, outcome),
                    None => {
                        tracing::trace!(label = %task.label, "tracked task vanished while blocking");
                    }
                }
            }
        }
    }

    /// Discard all in-flight work and rebuild the pool for a new world
    /// context.
    ///
    /// Pending outcomes are intentionally never delivered after this point:
    /// results computed against the torn-down world must not reach
    /// consumers. The pool is given the configured grace period to wind
    /// down, then recreated at the same size regardless. Idempotent.
    pub fn reset_for_new_context(&mut self) -> Result<()> {
        self.state = PoolState::Draining;

        if let Ok(mut pending) = self.pending.lock() {
            if !pending.is_empty() {
                tracing::debug!(
                    discarded = pending.len(),
                    "discarding pending tasks for context reset"
                );
            }
            pending.clear();
        }

        if let Some(pool) = self.pool.take() {
            if !pool.shutdown(self.config.shutdown_grace) {
                tracing::warn!("pool shutdown exceeded grace period; workers abandoned");
            }
        }
        self.state = PoolState::Stopped;

        self.pool = Some(WorkerPool::new(self.config.worker_count)?);
        self.state = PoolState::Running;
        self.since_drain = 0.0;
        tracing::info!(workers = self.worker_count(), "orchestrator reset for new context");
        Ok(())
    }

    fn deliver(
        &self,
        label: String,
        delivery: Delivery,
        outcome: std::result::Result<TaskPayload, TaskError>,
    ) {
        match delivery {
            Delivery::Event => {
                let event = match outcome {
                    Ok(payload) => EngineEvent::TaskCompleted { label, payload },
                    Err(error) => {
                        tracing::warn!(%error, "tracked task failed");
                        EngineEvent::TaskFailed { label, error }
                    }
                };
                if self.events.send(event).is_err() {
                    tracing::warn!("event receiver dropped; outcome discarded");
                }
            }
            Delivery::PathCallback { id, callback } => match outcome {
                Ok(TaskPayload::Waypoints(waypoints)) => callback(waypoints, id),
                Ok(_) => {
                    tracing::error!(%label, "path task produced a non-waypoint payload");
                    callback(Vec::new(), id);
                }
                Err(error) => {
                    // The callback contract is exactly-once; a failed search
                    // degrades to the no-route outcome.
                    tracing::warn!(%error, "pathfinding task failed");
                    callback(Vec::new(), id);
                }
            },
        }
    }
}

/// Best-effort extraction of a panic payload message.
fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "task panicked".to_string()
    }
}
