//! Compass directions for tile movement.

use serde::{Deserialize, Serialize};

/// One of the eight compass directions an agent may step in.
///
/// The pathfinder moves between tile centers; orthogonal steps cost 1.0 and
/// diagonal steps cost sqrt(2) before the floor speed modifier is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All eight directions, used for movement expansion
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The four orthogonal directions, used for region connectivity
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Tile-coordinate offset of one step in this direction
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }

    /// Whether this is a diagonal step
    #[inline]
    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast
                | Direction::SouthEast
                | Direction::SouthWest
                | Direction::NorthWest
        )
    }

    /// Base traversal cost of one step: 1.0 orthogonal, sqrt(2) diagonal
    #[inline]
    pub fn step_cost(self) -> f32 {
        if self.is_diagonal() {
            std::f32::consts::SQRT_2
        } else {
            1.0
        }
    }

    /// The two orthogonal directions flanking a diagonal step.
    ///
    /// A diagonal move is only legal when both flanking tiles are navigable,
    /// which keeps agents from cutting through right-angle corners. Returns
    /// `None` for orthogonal directions.
    #[inline]
    pub fn sides(self) -> Option<(Direction, Direction)> {
        match self {
            Direction::NorthEast => Some((Direction::North, Direction::East)),
            Direction::SouthEast => Some((Direction::South, Direction::East)),
            Direction::SouthWest => Some((Direction::South, Direction::West)),
            Direction::NorthWest => Some((Direction::North, Direction::West)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_costs() {
        assert_eq!(Direction::North.step_cost(), 1.0);
        assert_eq!(Direction::East.step_cost(), 1.0);
        assert!((Direction::NorthEast.step_cost() - std::f32::consts::SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_sides_only_for_diagonals() {
        for dir in Direction::ALL {
            assert_eq!(dir.sides().is_some(), dir.is_diagonal());
        }
    }

    #[test]
    fn test_sides_compose_to_diagonal() {
        for dir in Direction::ALL {
            if let Some((a, b)) = dir.sides() {
                let (dx, dy) = dir.offset();
                let (ax, ay) = a.offset();
                let (bx, by) = b.offset();
                assert_eq!((ax + bx, ay + by), (dx, dy));
            }
        }
    }
}
