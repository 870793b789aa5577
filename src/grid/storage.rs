//! Dense tile storage.

use crate::core::{AgentId, TilePos};

use super::{NavGrid, RegionId, RegionKind, UNASSIGNED_REGION};

/// A single tile of the world grid.
#[derive(Clone, Debug)]
pub struct Tile {
    /// Coarse classification; drives region partitioning and navigability
    pub kind: RegionKind,
    /// Finer biome-like tag; drives sub-region partitioning only
    pub biome: u8,
    /// Floor speed modifier (> 0); divides the cost of stepping onto the tile
    pub speed: f32,
    /// Agent currently blocking the tile, if any. An occupied tile is
    /// navigable only for its occupant (or via the exempt-origin rule).
    pub occupant: Option<AgentId>,
    /// Region id written by the last coarse classifier run
    pub region: RegionId,
    /// Sub-region id written by the last fine classifier run
    pub sub_region: RegionId,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            kind: RegionKind::Open,
            biome: 0,
            speed: 1.0,
            occupant: None,
            region: UNASSIGNED_REGION,
            sub_region: UNASSIGNED_REGION,
        }
    }
}

/// Dense row-major tile grid.
///
/// Owned by the simulation; the region classifier is its only region-id
/// writer, and every search reads it through the [`NavGrid`] view.
#[derive(Clone, Debug)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    next_region: RegionId,
    next_sub_region: RegionId,
}

impl TileGrid {
    /// Create a grid of open tiles with default speed.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            tiles: vec![Tile::default(); (width as usize) * (height as usize)],
            next_region: 0,
            next_sub_region: 0,
        }
    }

    #[inline]
    fn idx(&self, pos: TilePos) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        Some((pos.y as usize) * (self.width as usize) + pos.x as usize)
    }

    /// Borrow the tile at `pos`, if in bounds
    #[inline]
    pub fn tile(&self, pos: TilePos) -> Option<&Tile> {
        self.idx(pos).map(|i| &self.tiles[i])
    }

    /// Mutably borrow the tile at `pos`, if in bounds
    #[inline]
    pub fn tile_mut(&mut self, pos: TilePos) -> Option<&mut Tile> {
        self.idx(pos).map(move |i| &mut self.tiles[i])
    }

    /// Set the coarse kind of a tile. Region ids are stale afterwards until
    /// the classifier reruns.
    pub fn set_kind(&mut self, pos: TilePos, kind: RegionKind) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.kind = kind;
        }
    }

    /// Set the biome tag of a tile
    pub fn set_biome(&mut self, pos: TilePos, biome: u8) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.biome = biome;
        }
    }

    /// Set the floor speed modifier of a tile (must be > 0)
    pub fn set_speed(&mut self, pos: TilePos, speed: f32) {
        debug_assert!(speed > 0.0, "speed modifier must be positive");
        if let Some(tile) = self.tile_mut(pos) {
            tile.speed = speed;
        }
    }

    /// Place or clear an occupant on a tile
    pub fn set_occupant(&mut self, pos: TilePos, occupant: Option<AgentId>) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.occupant = occupant;
        }
    }

    pub(crate) fn set_region(&mut self, pos: TilePos, region: RegionId) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.region = region;
        }
    }

    pub(crate) fn set_sub_region(&mut self, pos: TilePos, sub_region: RegionId) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.sub_region = sub_region;
        }
    }

    /// Allocate a fresh region id for the current grid generation
    pub(crate) fn alloc_region_id(&mut self) -> RegionId {
        let id = self.next_region;
        self.next_region += 1;
        id
    }

    /// Allocate a fresh sub-region id for the current grid generation
    pub(crate) fn alloc_sub_region_id(&mut self) -> RegionId {
        let id = self.next_sub_region;
        self.next_sub_region += 1;
        id
    }

    /// Reset region id allocation; a full reclassification starts a new
    /// generation, after which old ids are meaningless.
    pub(crate) fn reset_region_ids(&mut self) {
        self.next_region = 0;
        for tile in &mut self.tiles {
            tile.region = UNASSIGNED_REGION;
        }
    }

    pub(crate) fn reset_sub_region_ids(&mut self) {
        self.next_sub_region = 0;
        for tile in &mut self.tiles {
            tile.sub_region = UNASSIGNED_REGION;
        }
    }

    /// Sub-region id of `pos` as written by the last fine classifier run
    #[inline]
    pub fn sub_region_id(&self, pos: TilePos) -> RegionId {
        self.tile(pos)
            .map(|t| t.sub_region)
            .unwrap_or(UNASSIGNED_REGION)
    }

    /// Number of region ids allocated in the current generation
    pub fn region_count(&self) -> u32 {
        self.next_region
    }

    /// Iterate all tile positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = TilePos> + '_ {
        let w = self.width;
        let h = self.height;
        (0..h).flat_map(move |y| (0..w).map(move |x| TilePos::new(x, y)))
    }

    /// Whether a tile lies on the outer border of the grid
    #[inline]
    pub fn is_border(&self, pos: TilePos) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x == self.width - 1 || pos.y == self.height - 1
    }
}

impl NavGrid for TileGrid {
    #[inline]
    fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn is_navigable(&self, pos: TilePos, agent: AgentId, exempt_origin: TilePos) -> bool {
        let Some(tile) = self.tile(pos) else {
            return false;
        };
        if tile.kind != RegionKind::Open {
            return false;
        }
        // The origin tile never blocks its own search.
        if pos == exempt_origin {
            return true;
        }
        match tile.occupant {
            None => true,
            Some(occupant) => occupant == agent,
        }
    }

    #[inline]
    fn speed_modifier(&self, pos: TilePos) -> f32 {
        self.tile(pos).map(|t| t.speed).unwrap_or(1.0)
    }

    #[inline]
    fn region_id(&self, pos: TilePos) -> RegionId {
        self.tile(pos).map(|t| t.region).unwrap_or(UNASSIGNED_REGION)
    }

    #[inline]
    fn region_kind(&self, pos: TilePos) -> RegionKind {
        self.tile(pos).map(|t| t.kind).unwrap_or(RegionKind::Solid)
    }
}
