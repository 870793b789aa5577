//! Terrain pathfinding over elevation maps.
//!
//! Structural twin of the tile-grid pathfinder used during procedural world
//! generation (river and road carving): same frontier, arena, and
//! stop-on-destination-pop termination, but the cost function penalizes
//! uphill steps by a fixed multiplier instead of dividing by floor speed.

use std::collections::{BinaryHeap, HashSet};

use crate::core::{Direction, TilePos};

use super::node::{FrontierEntry, NodeArena, SearchNode};

/// Elevation map used during world generation.
#[derive(Clone, Debug)]
pub struct HeightMap {
    width: i32,
    height: i32,
    levels: Vec<i32>,
}

impl HeightMap {
    /// Create a flat map at elevation zero.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "map dimensions must be positive");
        Self {
            width,
            height,
            levels: vec![0; (width as usize) * (height as usize)],
        }
    }

    /// Map width in cells
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Map height in cells
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether a cell lies inside the map
    #[inline]
    pub fn contains(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    #[inline]
    fn idx(&self, pos: TilePos) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some((pos.y as usize) * (self.width as usize) + pos.x as usize)
    }

    /// Elevation of a cell; out-of-bounds reads as zero
    #[inline]
    pub fn elevation(&self, pos: TilePos) -> i32 {
        self.idx(pos).map(|i| self.levels[i]).unwrap_or(0)
    }

    /// Set the elevation of a cell
    pub fn set_elevation(&mut self, pos: TilePos, level: i32) {
        if let Some(i) = self.idx(pos) {
            self.levels[i] = level;
        }
    }
}

/// Configuration for the terrain pathfinder.
#[derive(Clone, Debug)]
pub struct TerrainPathConfig {
    /// Multiplier applied to the step cost when moving to a higher cell
    pub uphill_penalty: f32,
}

impl Default for TerrainPathConfig {
    fn default() -> Self {
        Self {
            uphill_penalty: 4.0,
        }
    }
}

/// Pathfinder over elevation maps.
pub struct TerrainPathfinder {
    config: TerrainPathConfig,
}

impl TerrainPathfinder {
    /// Create a terrain pathfinder with configuration.
    pub fn new(config: TerrainPathConfig) -> Self {
        Self { config }
    }

    /// Create a terrain pathfinder with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TerrainPathConfig::default())
    }

    /// Find a cheapest route from `origin` to `destination`.
    ///
    /// Returns cells in origin -> destination order including both
    /// endpoints, or an empty vector when either endpoint is out of bounds.
    /// Every in-bounds cell is traversable; elevation only shapes cost.
    pub fn find_path(
        &self,
        map: &HeightMap,
        origin: TilePos,
        destination: TilePos,
    ) -> Vec<TilePos> {
        if !map.contains(origin) || !map.contains(destination) {
            return Vec::new();
        }
        if origin == destination {
            return vec![destination];
        }

        let mut arena = NodeArena::new();
        let mut frontier: BinaryHeap<FrontierEntry> = BinaryHeap::new();
        let mut closed: HashSet<TilePos> = HashSet::new();

        let start = arena.insert(SearchNode {
            pos: origin.center(),
            tile: origin,
            cost: 0.0,
            heuristic: origin.center().distance(destination.center()),
            parent: None,
        });
        frontier.push(FrontierEntry {
            idx: start,
            f: arena.node(start).heuristic,
        });

        while let Some(entry) = frontier.pop() {
            let (tile, cost) = {
                let node = arena.node(entry.idx);
                (node.tile, node.cost)
            };
            if closed.contains(&tile) {
                continue;
            }
            if tile == destination {
                frontier.clear();
                break;
            }
            closed.insert(tile);

            for dir in Direction::ALL {
                let next = tile.offset(dir);
                if !map.contains(next) || closed.contains(&next) {
                    continue;
                }

                let new_cost = cost + self.edge_cost(map, tile, next, dir);
                match arena.lookup(next) {
                    Some(existing) if arena.node(existing).cost <= new_cost => {}
                    Some(existing) => {
                        let heuristic = arena.node(existing).heuristic;
                        arena.relax(existing, new_cost, entry.idx);
                        frontier.push(FrontierEntry {
                            idx: existing,
                            f: new_cost + heuristic,
                        });
                    }
                    None => {
                        let heuristic = next.center().distance(destination.center());
                        let idx = arena.insert(SearchNode {
                            pos: next.center(),
                            tile: next,
                            cost: new_cost,
                            heuristic,
                            parent: Some(entry.idx),
                        });
                        frontier.push(FrontierEntry {
                            idx,
                            f: new_cost + heuristic,
                        });
                    }
                }
            }
        }

        let Some(goal_idx) = arena.lookup(destination) else {
            return Vec::new();
        };
        arena
            .reconstruct(goal_idx)
            .into_iter()
            .map(|p| p.tile())
            .collect()
    }

    /// Step distance, multiplied by the uphill penalty when climbing.
    #[inline]
    fn edge_cost(&self, map: &HeightMap, from: TilePos, to: TilePos, dir: Direction) -> f32 {
        let base = dir.step_cost();
        if map.elevation(to) > map.elevation(from) {
            base * self.config.uphill_penalty
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_map_direct_route() {
        let map = HeightMap::new(5, 5);
        let finder = TerrainPathfinder::with_defaults();
        let path = finder.find_path(&map, TilePos::new(0, 0), TilePos::new(4, 4));

        assert_eq!(path.first(), Some(&TilePos::new(0, 0)));
        assert_eq!(path.last(), Some(&TilePos::new(4, 4)));
        // Diagonal movement makes the direct route 5 cells.
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_uphill_routes_around_ridge() {
        // Raised ridge across the middle row except a level gap at x=0.
        let mut map = HeightMap::new(5, 5);
        for x in 1..5 {
            map.set_elevation(TilePos::new(x, 2), 10);
        }
        let finder = TerrainPathfinder::with_defaults();
        let path = finder.find_path(&map, TilePos::new(2, 0), TilePos::new(2, 4));

        assert!(!path.is_empty());
        // The route crosses the middle row through the unraised gap.
        let crossing: Vec<&TilePos> = path.iter().filter(|p| p.y == 2).collect();
        assert!(crossing.iter().all(|p| map.elevation(**p) == 0));
    }

    #[test]
    fn test_same_cell_shortcut() {
        let map = HeightMap::new(3, 3);
        let finder = TerrainPathfinder::with_defaults();
        let path = finder.find_path(&map, TilePos::new(1, 1), TilePos::new(1, 1));
        assert_eq!(path, vec![TilePos::new(1, 1)]);
    }
}
