//! Future-like handles over pool computations.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{Receiver, TryRecvError};

use super::pool::Job;

/// Result of polling a [`TaskHandle`].
#[derive(Clone, Debug, PartialEq)]
pub enum TaskPoll<T> {
    /// The computation finished and produced a value
    Ready(T),
    /// The computation has not finished yet
    Pending,
    /// The computation will never produce a value: it was cancelled, its
    /// pool was torn down before it ran, or it panicked without a typed
    /// error path
    Gone,
}

/// Handle to a computation submitted to the worker pool.
///
/// The value is delivered through a single-slot channel; polling never
/// blocks, waiting does. Cancellation is best-effort: the computation may
/// still run to completion in the background, but its result is discarded.
pub struct TaskHandle<T> {
    result: Receiver<T>,
    cancelled: Arc<AtomicBool>,
}

impl<T: Send + 'static> TaskHandle<T> {
    /// Package `work` into a pool job and the handle observing it.
    ///
    /// A panicking job delivers nothing; the handle reports [`TaskPoll::Gone`].
    /// The panic is contained here so one faulty task never takes a worker
    /// thread down with it.
    pub(crate) fn package<F>(work: F) -> (Job, TaskHandle<T>)
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let job: Job = Box::new(move || {
            match panic::catch_unwind(AssertUnwindSafe(work)) {
                Ok(value) => {
                    if !flag.load(Ordering::Acquire) {
                        // Send fails only when the handle was dropped; the
                        // result is simply discarded then.
                        let _ = tx.send(value);
                    }
                }
                Err(_) => {
                    tracing::warn!("background task panicked; result discarded");
                }
            }
        });

        (job, TaskHandle { result: rx, cancelled })
    }

    /// Poll for the result without blocking.
    pub fn try_take(&self) -> TaskPoll<T> {
        match self.result.try_recv() {
            Ok(value) => TaskPoll::Ready(value),
            Err(TryRecvError::Empty) => TaskPoll::Pending,
            Err(TryRecvError::Disconnected) => TaskPoll::Gone,
        }
    }

    /// Block until the computation finishes.
    ///
    /// Returns `None` when no value will ever arrive (cancelled, panicked,
    /// or the pool was reset before the job ran).
    pub fn wait(self) -> Option<T> {
        self.result.recv().ok()
    }

    /// Request cancellation. Best-effort: a result produced after this call
    /// is discarded, but a computation already running is not interrupted.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_poll_then_ready() {
        let (job, handle) = TaskHandle::package(|| 42u32);
        assert_eq!(handle.try_take(), TaskPoll::Pending);
        job();
        assert_eq!(handle.try_take(), TaskPoll::Ready(42));
        // The slot is single-use.
        assert_eq!(handle.try_take(), TaskPoll::Gone);
    }

    #[test]
    fn test_cancel_discards_result() {
        let (job, handle) = TaskHandle::package(|| 7u32);
        handle.cancel();
        job();
        assert!(handle.is_cancelled());
        assert_eq!(handle.try_take(), TaskPoll::Gone);
    }

    #[test]
    fn test_panic_reports_gone() {
        let (job, handle) = TaskHandle::<u32>::package(|| panic!("boom"));
        job();
        assert_eq!(handle.try_take(), TaskPoll::Gone);
    }

    #[test]
    fn test_dropped_job_reports_gone() {
        let (job, handle) = TaskHandle::package(|| 1u32);
        drop(job);
        assert_eq!(handle.try_take(), TaskPoll::Gone);
        let (_job, pending) = TaskHandle::package(|| 2u32);
        assert_eq!(
            pending.result.recv_timeout(Duration::ZERO).ok(),
            None,
            "undropped job must still be pending"
        );
    }
}
