//! Grid adapter and tile storage.
//!
//! The pathfinder consumes a read-only view of the world grid through the
//! [`NavGrid`] trait:
//!
//! - Per-tile navigability, optionally conditioned on the requesting agent
//!   and an origin tile exempted from its own blocking rule
//! - A floor speed modifier that divides traversal cost
//! - A region id and coarse region kind written by the region classifier
//!
//! [`TileGrid`] is the concrete dense implementation owned by the simulation;
//! external world modules may implement [`NavGrid`] over their own storage.

mod storage;

pub use storage::{Tile, TileGrid};

use serde::{Deserialize, Serialize};

use crate::core::{AgentId, TilePos};

/// Identifier of a connected region of like-classified tiles.
///
/// Region ids are unique only within one generation of the grid; a rerun of
/// the classifier may assign different numbers to the same partition.
pub type RegionId = u32;

/// Sentinel region id for tiles the classifier has not visited yet.
///
/// Every tile must be classified before any search reads it; this ordering is
/// a caller obligation.
pub const UNASSIGNED_REGION: RegionId = RegionId::MAX;

/// Coarse classification of a tile, shared by every tile of a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RegionKind {
    /// Ordinarily navigable terrain. Region ids of `Open` tiles encode full
    /// reachability, which the pathfinder's fast-rejection check relies on.
    #[default]
    Open,
    /// Permanently non-navigable interior (deep wall or river body). Worth
    /// flood-filling out of, but never a valid destination.
    Solid,
}

/// Read-only view of the world grid consumed by the pathfinder.
///
/// Implementations must be cheap to query; every method is called in the
/// inner loop of a search. No method may mutate tile state.
pub trait NavGrid {
    /// Grid width in tiles
    fn width(&self) -> i32;

    /// Grid height in tiles
    fn height(&self) -> i32;

    /// Whether a tile coordinate lies inside the grid
    #[inline]
    fn contains(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width() && pos.y < self.height()
    }

    /// Whether `agent` may stand on `pos`.
    ///
    /// `exempt_origin` is the search's origin tile, which is exempted from
    /// its own blocking rule so an agent can path out of the tile it
    /// currently occupies or blocks.
    fn is_navigable(&self, pos: TilePos, agent: AgentId, exempt_origin: TilePos) -> bool;

    /// Floor speed modifier at `pos` (> 0); divides the cost of stepping
    /// onto the tile.
    fn speed_modifier(&self, pos: TilePos) -> f32;

    /// Region id of `pos` as written by the last classifier run
    fn region_id(&self, pos: TilePos) -> RegionId;

    /// Coarse region kind of `pos`
    fn region_kind(&self, pos: TilePos) -> RegionKind;
}
