//! Opaque identity handles.

use serde::{Deserialize, Serialize};

/// Handle for the agent a path is being computed for.
///
/// The engine never inspects the agent beyond passing it to the grid's
/// navigability predicate; tiles may admit or block specific agents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u64);

/// Correlation id for an asynchronous pathfinding request.
///
/// Handed back to the caller's callback together with the waypoints so the
/// requesting system can match results to requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);
