//! Pathfinding over tile grids and elevation maps.
//!
//! - [`find_path`]: weighted A*-style search between world positions on the
//!   navigable tile grid, with region-based fast rejection and the diagonal
//!   corner-cutting rule
//! - [`TerrainPathfinder`]: the structurally identical variant over
//!   [`HeightMap`]s used by procedural generation, penalizing uphill steps
//!
//! Both share the per-invocation node arena and priority-queue frontier in
//! [`node`]; no search state is reused or shared across invocations, so any
//! number of searches may run in parallel against one read-only grid.

mod finder;
mod node;
mod terrain;

pub use finder::find_path;
pub use terrain::{HeightMap, TerrainPathConfig, TerrainPathfinder};
