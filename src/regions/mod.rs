//! Region classification via flood fill.
//!
//! Partitions the tile grid into maximal 4-connected components of
//! like-classified tiles:
//!
//! - [`assign_regions`]: full repartition on the coarse tile kind
//! - [`assign_regions_from`]: repartition seeded from an edited tile subset
//! - [`assign_sub_regions`]: same fill on the finer (kind, biome) predicate
//! - [`seal_enclosed_pockets`]: reclassify fully-enclosed open pockets solid
//!
//! All operations are O(tiles), synchronous, and idempotent: rerunning on an
//! unmodified grid yields the same partition, though the numeric ids may
//! differ between runs. Region ids encode reachability for same-kind terrain,
//! which the pathfinder's fast-rejection check depends on; the classifier
//! must complete before any search that reads its output is submitted.

use std::collections::{HashSet, VecDeque};

use crate::core::{Direction, TilePos};
use crate::grid::{NavGrid, RegionKind, TileGrid, UNASSIGNED_REGION};

/// Repartition the whole grid into coarse regions.
///
/// Every tile receives a freshly allocated region id; ids from previous runs
/// are invalidated. Connectivity uses the four orthogonal neighbors only,
/// even though agents may move diagonally.
pub fn assign_regions(grid: &mut TileGrid) {
    grid.reset_region_ids();

    let positions: Vec<TilePos> = grid.positions().collect();
    let mut queue = VecDeque::new();

    for seed in positions {
        if grid.region_id(seed) != UNASSIGNED_REGION {
            continue;
        }
        let kind = grid.region_kind(seed);
        let id = grid.alloc_region_id();
        flood_region(grid, seed, kind, id, &mut queue);
    }

    tracing::debug!(
        regions = grid.region_count(),
        "coarse region classification complete"
    );
}

/// Repartition only the areas reachable from `seeds`.
///
/// Used after a localized edit: tiles 4-connected to a seed through
/// like-kind terrain are restamped with fresh ids; untouched areas keep
/// their existing ids.
pub fn assign_regions_from(seeds: &[TilePos], grid: &mut TileGrid) {
    let mut visited: HashSet<TilePos> = HashSet::new();
    let mut queue = VecDeque::new();

    for &seed in seeds {
        if !grid.contains(seed) || visited.contains(&seed) {
            continue;
        }
        let kind = grid.region_kind(seed);
        let id = grid.alloc_region_id();

        queue.clear();
        queue.push_back(seed);
        visited.insert(seed);
        grid.set_region(seed, id);

        while let Some(pos) = queue.pop_front() {
            for dir in Direction::CARDINAL {
                let next = pos.offset(dir);
                if !grid.contains(next) || visited.contains(&next) {
                    continue;
                }
                if grid.region_kind(next) != kind {
                    continue;
                }
                visited.insert(next);
                grid.set_region(next, id);
                queue.push_back(next);
            }
        }
    }
}

/// Repartition the whole grid into sub-regions.
///
/// Identical to [`assign_regions`] but on the finer (kind, biome) equality
/// predicate, writing sub-region ids. Distinguishes biome-like sub-areas
/// within one coarse region.
pub fn assign_sub_regions(grid: &mut TileGrid) {
    grid.reset_sub_region_ids();

    let positions: Vec<TilePos> = grid.positions().collect();
    let mut queue = VecDeque::new();

    for seed in positions {
        if grid.sub_region_id(seed) != UNASSIGNED_REGION {
            continue;
        }
        let key = sub_key(grid, seed);
        let id = grid.alloc_sub_region_id();

        queue.clear();
        queue.push_back(seed);
        grid.set_sub_region(seed, id);

        while let Some(pos) = queue.pop_front() {
            for dir in Direction::CARDINAL {
                let next = pos.offset(dir);
                if !grid.contains(next) || grid.sub_region_id(next) != UNASSIGNED_REGION {
                    continue;
                }
                if sub_key(grid, next) != key {
                    continue;
                }
                grid.set_sub_region(next, id);
                queue.push_back(next);
            }
        }
    }
}

/// Reclassify fully-enclosed open pockets as solid terrain.
///
/// An open tile with no 4-connected route through open terrain to the grid
/// border belongs to an enclosed pocket (e.g. air sealed inside a mountain)
/// and is turned solid. Returns the number of sealed tiles. Region ids are
/// stale afterwards; the caller reruns [`assign_regions`].
pub fn seal_enclosed_pockets(grid: &mut TileGrid) -> usize {
    let mut reachable: HashSet<TilePos> = HashSet::new();
    let mut queue = VecDeque::new();

    // Flood inward from every open border tile.
    let border: Vec<TilePos> = grid
        .positions()
        .filter(|&p| grid.is_border(p) && grid.region_kind(p) == RegionKind::Open)
        .collect();
    for seed in border {
        if reachable.insert(seed) {
            queue.push_back(seed);
        }
    }

    while let Some(pos) = queue.pop_front() {
        for dir in Direction::CARDINAL {
            let next = pos.offset(dir);
            if !grid.contains(next) || reachable.contains(&next) {
                continue;
            }
            if grid.region_kind(next) != RegionKind::Open {
                continue;
            }
            reachable.insert(next);
            queue.push_back(next);
        }
    }

    let enclosed: Vec<TilePos> = grid
        .positions()
        .filter(|&p| grid.region_kind(p) == RegionKind::Open && !reachable.contains(&p))
        .collect();
    for pos in &enclosed {
        grid.set_kind(*pos, RegionKind::Solid);
    }

    if !enclosed.is_empty() {
        tracing::debug!(sealed = enclosed.len(), "sealed enclosed open pockets");
    }
    enclosed.len()
}

/// BFS flood fill stamping `id` over the like-kind component containing `seed`.
fn flood_region(
    grid: &mut TileGrid,
    seed: TilePos,
    kind: RegionKind,
    id: u32,
    queue: &mut VecDeque<TilePos>,
) {
    queue.clear();
    queue.push_back(seed);
    grid.set_region(seed, id);

    while let Some(pos) = queue.pop_front() {
        for dir in Direction::CARDINAL {
            let next = pos.offset(dir);
            if !grid.contains(next) || grid.region_id(next) != UNASSIGNED_REGION {
                continue;
            }
            if grid.region_kind(next) != kind {
                continue;
            }
            grid.set_region(next, id);
            queue.push_back(next);
        }
    }
}

#[inline]
fn sub_key(grid: &TileGrid, pos: TilePos) -> Option<(RegionKind, u8)> {
    grid.tile(pos).map(|t| (t.kind, t.biome))
}
