//! Asynchronous task execution framework.
//!
//! Runs pathfinding searches and arbitrary background computations on a
//! fixed-size worker pool, off the main simulation thread:
//!
//! - [`TaskOrchestrator`]: submission front door, tracked-task registry,
//!   periodic drain, blocking drain, and context reset
//! - [`TaskHandle`]: future-like handle for untracked computations
//! - [`default_worker_count`]: hardware-derived pool sizing policy
//!
//! The main loop stays single-threaded and never blocks on results except
//! through the explicit blocking drain.

mod handle;
mod orchestrator;
mod pool;

pub use handle::{TaskHandle, TaskPoll};
pub use orchestrator::{OrchestratorConfig, PathRequest, PoolState, TaskOrchestrator};
pub use pool::default_worker_count;
