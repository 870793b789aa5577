//! Tile and world coordinate types.

use serde::{Deserialize, Serialize};

use super::Direction;

/// Integer tile coordinate on the world grid.
///
/// Ordered by (x, y) so tile collections sort into a stable canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct TilePos {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl TilePos {
    /// Create a new tile coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Center of this tile in world coordinates
    #[inline]
    pub fn center(self) -> WorldPos {
        WorldPos::new(self.x as f32 + 0.5, self.y as f32 + 0.5)
    }

    /// Tile one step away in the given direction
    #[inline]
    pub fn offset(self, dir: Direction) -> TilePos {
        let (dx, dy) = dir.offset();
        TilePos::new(self.x + dx, self.y + dy)
    }
}

/// Continuous world coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    /// X coordinate in world units
    pub x: f32,
    /// Y coordinate in world units
    pub y: f32,
}

impl WorldPos {
    /// Create a new world position
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The tile containing this world position
    #[inline]
    pub fn tile(self) -> TilePos {
        TilePos::new(self.x.floor() as i32, self.y.floor() as i32)
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: WorldPos) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_center() {
        let pos = TilePos::new(3, 7);
        let center = pos.center();
        assert_eq!(center, WorldPos::new(3.5, 7.5));
        assert_eq!(center.tile(), pos);
    }

    #[test]
    fn test_world_to_tile_floors() {
        assert_eq!(WorldPos::new(0.99, 0.01).tile(), TilePos::new(0, 0));
        assert_eq!(WorldPos::new(2.5, 1.0).tile(), TilePos::new(2, 1));
        assert_eq!(WorldPos::new(-0.5, 3.5).tile(), TilePos::new(-1, 3));
    }

    #[test]
    fn test_distance() {
        let a = WorldPos::new(0.5, 0.5);
        let b = WorldPos::new(3.5, 4.5);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_offset_steps_one_tile() {
        let p = TilePos::new(4, 4);
        for dir in Direction::ALL {
            let stepped = p.offset(dir);
            assert_eq!((stepped.x - p.x, stepped.y - p.y), dir.offset());
        }
    }

    #[test]
    fn test_ordering_is_column_major() {
        let mut tiles = vec![TilePos::new(1, 0), TilePos::new(0, 1), TilePos::new(0, 0)];
        tiles.sort();
        assert_eq!(
            tiles,
            vec![TilePos::new(0, 0), TilePos::new(0, 1), TilePos::new(1, 0)]
        );
    }
}
