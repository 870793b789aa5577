//! Outcome events delivered to the rest of the system.
//!
//! Tracked background tasks report completion through a single typed event
//! channel owned by the application root and injected into the orchestrator
//! at construction. No global registries, no reflection-based dispatch: the
//! outcome space is a closed sum type.

use crossbeam_channel::{Receiver, Sender};

use crate::core::WorldPos;
use crate::error::TaskError;

/// Payload carried by a successful tracked task.
#[derive(Clone, Debug, PartialEq)]
pub enum TaskPayload {
    /// Completion with nothing to report
    Unit,
    /// Human-readable result, e.g. a notification line
    Text(String),
    /// Numeric result, e.g. items processed
    Count(u64),
    /// Waypoint list from a pathfinding task
    Waypoints(Vec<WorldPos>),
}

/// Event emitted by the orchestrator's drain cycle.
#[derive(Clone, Debug)]
pub enum EngineEvent {
    /// A tracked task completed; `label` is the caller-specified tag given
    /// at submission time.
    TaskCompleted { label: String, payload: TaskPayload },
    /// A tracked task failed; the error is captured per task and never
    /// propagates into the drain loop.
    TaskFailed { label: String, error: TaskError },
}

/// Create the engine event channel pair.
///
/// The sender side goes to the orchestrator; the receiver side stays with
/// the main loop, which consumes events at its own pace.
pub fn event_channel() -> (Sender<EngineEvent>, Receiver<EngineEvent>) {
    crossbeam_channel::unbounded()
}
