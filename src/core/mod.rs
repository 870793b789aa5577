//! Core types for the marga-nav engine.
//!
//! ## Type Categories
//!
//! ### Coordinates
//! - [`TilePos`]: Integer tile indices into the world grid
//! - [`WorldPos`]: Continuous world coordinates; a tile's center sits at
//!   integer position + (0.5, 0.5)
//!
//! ### Movement
//! - [`Direction`]: The eight compass directions with step costs and the
//!   flanking-side decomposition used by the diagonal corner-cutting rule
//!
//! ### Identity
//! - [`AgentId`]: Opaque handle for the agent a path is requested for
//! - [`RequestId`]: Correlation id carried back to the pathfinding caller

mod direction;
mod ids;
mod point;

pub use direction::Direction;
pub use ids::{AgentId, RequestId};
pub use point::{TilePos, WorldPos};
