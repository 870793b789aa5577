//! Weighted A*-style search over tile centers.
//!
//! Computes a navigable route between two world positions:
//!
//! - Region-based fast rejection avoids searching when unreachability is
//!   already provable from region membership
//! - Edge costs are step distance (1.0 orthogonal, sqrt(2) diagonal) divided
//!   by the destination tile's floor speed modifier; the seed edges from the
//!   origin point charge plain Euclidean distance
//! - Diagonal steps require both flanking orthogonal tiles to be navigable,
//!   so agents never cut through right-angle corners
//!
//! The heuristic is plain Euclidean distance to the destination. With speed
//! modifiers below 1.0 it is not strictly admissible; the search is treated
//! as fast and near-optimal rather than proven-optimal A*.

use std::collections::{BinaryHeap, HashSet};

use crate::core::{AgentId, Direction, TilePos, WorldPos};
use crate::grid::{NavGrid, RegionKind};

use super::node::{FrontierEntry, NodeArena, SearchNode};

/// Find a path from `origin` to `destination` for `agent`.
///
/// Returns waypoints in origin -> destination order, ending exactly on the
/// destination point. An empty vector means no route exists; that is a
/// normal, completed outcome, not an error. When both endpoints share a tile
/// the result is `[destination]` with no search performed.
pub fn find_path<G: NavGrid>(
    origin: WorldPos,
    destination: WorldPos,
    grid: &G,
    agent: AgentId,
) -> Vec<WorldPos> {
    let origin_tile = origin.tile();
    let dest_tile = destination.tile();

    if !grid.contains(origin_tile) || !grid.contains(dest_tile) {
        tracing::trace!(?origin, ?destination, "path endpoints out of bounds");
        return Vec::new();
    }

    if origin_tile == dest_tile {
        return vec![destination];
    }

    // A permanently solid destination can never be stood on.
    if grid.region_kind(dest_tile) != RegionKind::Open {
        return Vec::new();
    }

    // Fast rejection: region ids already encode reachability for open
    // terrain, so a cross-region request from an open origin cannot succeed.
    // A non-open origin (agent inside sealed terrain) still gets a search,
    // since its region id says nothing about where it can flood out to.
    if grid.region_id(origin_tile) != grid.region_id(dest_tile)
        && grid.region_kind(origin_tile) == RegionKind::Open
    {
        return Vec::new();
    }

    let mut arena = NodeArena::new();
    let mut frontier: BinaryHeap<FrontierEntry> = BinaryHeap::new();
    let mut closed: HashSet<TilePos> = HashSet::new();

    // Seed the frontier with the origin's navigable neighbors.
    for dir in Direction::ALL {
        if !step_allowed(grid, origin_tile, dir, agent, origin_tile) {
            continue;
        }
        let tile = origin_tile.offset(dir);
        let center = tile.center();
        // Seed edges charge plain distance from the origin point; only
        // interior edges are speed-divided.
        let cost = origin.distance(center);
        let heuristic = center.distance(destination);
        let idx = arena.insert(SearchNode {
            pos: center,
            tile,
            cost,
            heuristic,
            parent: None,
        });
        frontier.push(FrontierEntry {
            idx,
            f: cost + heuristic,
        });
    }

    // Expand until the destination tile pops or the frontier empties.
    while let Some(entry) = frontier.pop() {
        let (tile, cost) = {
            let node = arena.node(entry.idx);
            (node.tile, node.cost)
        };
        if closed.contains(&tile) {
            continue;
        }
        if tile == dest_tile {
            frontier.clear();
            break;
        }
        closed.insert(tile);

        for dir in Direction::ALL {
            let next = tile.offset(dir);
            if closed.contains(&next) {
                continue;
            }
            if !step_allowed(grid, tile, dir, agent, origin_tile) {
                continue;
            }

            let new_cost = cost + dir.step_cost() / grid.speed_modifier(next);
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
                    let center = next.center();
                    let heuristic = center.distance(destination);
                    let idx = arena.insert(SearchNode {
                        pos: center,
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

    // Frontier exhausted without recording the destination: no route.
    let Some(goal_idx) = arena.lookup(dest_tile) else {
        return Vec::new();
    };

    // End the path on the exact requested point, not the tile center.
    arena.set_pos(goal_idx, destination);
    arena.reconstruct(goal_idx)
}

/// Whether a step from `from` in `dir` is legal for `agent`.
///
/// The target tile must be navigable, and a diagonal step additionally
/// requires both flanking orthogonal tiles to be navigable.
fn step_allowed<G: NavGrid>(
    grid: &G,
    from: TilePos,
    dir: Direction,
    agent: AgentId,
    exempt_origin: TilePos,
) -> bool {
    let to = from.offset(dir);
    if !grid.contains(to) || !grid.is_navigable(to, agent, exempt_origin) {
        return false;
    }
    if let Some((a, b)) = dir.sides() {
        let side_a = from.offset(a);
        let side_b = from.offset(b);
        if !grid.contains(side_a) || !grid.is_navigable(side_a, agent, exempt_origin) {
            return false;
        }
        if !grid.contains(side_b) || !grid.is_navigable(side_b, agent, exempt_origin) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TileGrid;
    use crate::regions::assign_regions;

    fn open_grid(w: i32, h: i32) -> TileGrid {
        let mut grid = TileGrid::new(w, h);
        assign_regions(&mut grid);
        grid
    }

    const AGENT: AgentId = AgentId(1);

    #[test]
    fn test_straight_line() {
        let grid = open_grid(3, 3);
        let path = find_path(
            WorldPos::new(0.5, 1.5),
            WorldPos::new(2.5, 1.5),
            &grid,
            AGENT,
        );
        assert_eq!(path, vec![WorldPos::new(1.5, 1.5), WorldPos::new(2.5, 1.5)]);
    }

    #[test]
    fn test_same_tile_returns_destination() {
        let grid = open_grid(3, 3);
        let dest = WorldPos::new(1.9, 1.1);
        let path = find_path(WorldPos::new(1.2, 1.8), dest, &grid, AGENT);
        assert_eq!(path, vec![dest]);
    }

    #[test]
    fn test_out_of_bounds_is_empty() {
        let grid = open_grid(3, 3);
        let path = find_path(
            WorldPos::new(0.5, 0.5),
            WorldPos::new(9.5, 0.5),
            &grid,
            AGENT,
        );
        assert!(path.is_empty());
    }

    #[test]
    fn test_solid_destination_is_empty() {
        let mut grid = TileGrid::new(3, 3);
        grid.set_kind(TilePos::new(2, 2), crate::grid::RegionKind::Solid);
        assign_regions(&mut grid);

        let path = find_path(
            WorldPos::new(0.5, 0.5),
            WorldPos::new(2.5, 2.5),
            &grid,
            AGENT,
        );
        assert!(path.is_empty());
    }

    #[test]
    fn test_cross_region_fast_rejection() {
        let mut grid = TileGrid::new(5, 5);
        for y in 0..5 {
            grid.set_kind(TilePos::new(2, y), crate::grid::RegionKind::Solid);
        }
        assign_regions(&mut grid);

        let path = find_path(
            WorldPos::new(0.5, 2.5),
            WorldPos::new(4.5, 2.5),
            &grid,
            AGENT,
        );
        assert!(path.is_empty());
    }

    #[test]
    fn test_slow_floor_is_avoided() {
        // The slow tile sits two steps out, so every route into it pays the
        // divided edge cost 1/0.1 = 10; the detour through the fast rows
        // wins.
        let mut grid = TileGrid::new(5, 3);
        grid.set_speed(TilePos::new(2, 1), 0.1);
        assign_regions(&mut grid);

        let path = find_path(
            WorldPos::new(0.5, 1.5),
            WorldPos::new(4.5, 1.5),
            &grid,
            AGENT,
        );
        assert_eq!(path.len(), 4);
        assert!(!path.contains(&WorldPos::new(2.5, 1.5)));
        assert_eq!(path.last(), Some(&WorldPos::new(4.5, 1.5)));
    }

    #[test]
    fn test_seed_edge_ignores_speed_modifier() {
        // Stepping off the origin point is never speed-divided: a slow tile
        // directly adjacent to the origin is crossed, not detoured around.
        let mut grid = TileGrid::new(3, 3);
        grid.set_speed(TilePos::new(1, 1), 0.1);
        assign_regions(&mut grid);

        let path = find_path(
            WorldPos::new(0.5, 1.5),
            WorldPos::new(2.5, 1.5),
            &grid,
            AGENT,
        );
        assert_eq!(path, vec![WorldPos::new(1.5, 1.5), WorldPos::new(2.5, 1.5)]);
    }

    #[test]
    fn test_occupied_origin_can_be_left() {
        // Another agent blocks the origin tile; the exempt-origin rule still
        // lets the search seed its neighbors.
        let mut grid = TileGrid::new(3, 1);
        grid.set_occupant(TilePos::new(0, 0), Some(AgentId(99)));
        assign_regions(&mut grid);

        let path = find_path(
            WorldPos::new(0.5, 0.5),
            WorldPos::new(2.5, 0.5),
            &grid,
            AGENT,
        );
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_corner_cutting_forbidden() {
        // Destination touches the origin diagonally, but one flanking tile
        // is solid: the one-step diagonal is illegal and the path must route
        // around through the open flank instead.
        let mut grid = TileGrid::new(3, 3);
        grid.set_kind(TilePos::new(1, 1), crate::grid::RegionKind::Solid);
        assign_regions(&mut grid);

        let dest = WorldPos::new(1.5, 0.5);
        let path = find_path(WorldPos::new(0.5, 1.5), dest, &grid, AGENT);
        assert_eq!(path, vec![WorldPos::new(0.5, 0.5), dest]);
    }
}
