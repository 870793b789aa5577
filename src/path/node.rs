//! Search-node arena and frontier machinery shared by both pathfinders.
//!
//! Every search invocation allocates its own arena and frontier; nothing is
//! pooled or shared across concurrent searches, so parallel invocations need
//! no synchronization.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::core::{TilePos, WorldPos};

/// A node in the search graph.
#[derive(Clone, Debug)]
pub(crate) struct SearchNode {
    /// Node position; tile center, except the destination node which is
    /// overridden with the exact destination point during reconstruction
    pub pos: WorldPos,
    /// Tile this node stands on
    pub tile: TilePos,
    /// Accumulated cost from the origin
    pub cost: f32,
    /// Heuristic estimate of remaining cost to the destination
    pub heuristic: f32,
    /// Arena index of the predecessor node; `None` for frontier seeds
    pub parent: Option<usize>,
}

/// Arena of search nodes with a sparse tile -> node lookup.
///
/// Nodes are addressed by index; relaxation updates a node in place, leaving
/// stale frontier entries to be skipped via the closed set.
pub(crate) struct NodeArena {
    nodes: Vec<SearchNode>,
    by_tile: HashMap<TilePos, usize>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            by_tile: HashMap::new(),
        }
    }

    #[inline]
    pub fn node(&self, idx: usize) -> &SearchNode {
        &self.nodes[idx]
    }

    /// Index of the node recorded for `tile`, if any
    #[inline]
    pub fn lookup(&self, tile: TilePos) -> Option<usize> {
        self.by_tile.get(&tile).copied()
    }

    /// Insert a fresh node and record it in the tile lookup
    pub fn insert(&mut self, node: SearchNode) -> usize {
        let idx = self.nodes.len();
        self.by_tile.insert(node.tile, idx);
        self.nodes.push(node);
        idx
    }

    /// Relax an existing node with a strictly cheaper route
    #[inline]
    pub fn relax(&mut self, idx: usize, cost: f32, parent: usize) {
        let node = &mut self.nodes[idx];
        node.cost = cost;
        node.parent = Some(parent);
    }

    /// Override a node's stored position (exact-destination fixup)
    #[inline]
    pub fn set_pos(&mut self, idx: usize, pos: WorldPos) {
        self.nodes[idx].pos = pos;
    }

    /// Walk predecessor links from `goal_idx` and return the path in
    /// origin -> destination order.
    pub fn reconstruct(&self, goal_idx: usize) -> Vec<WorldPos> {
        let mut path = Vec::new();
        let mut cursor = Some(goal_idx);
        while let Some(idx) = cursor {
            let node = &self.nodes[idx];
            path.push(node.pos);
            cursor = node.parent;
        }
        path.reverse();
        path
    }
}

/// Frontier entry ordered by total estimated cost.
///
/// Ties resolve by the binary heap's internal order: deterministic for this
/// implementation but not a stable contract across runs or versions.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FrontierEntry {
    pub idx: usize,
    /// cost-to-reach + heuristic at push time
    pub f: f32,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior (lower f = higher priority)
        other.f.partial_cmp(&self.f).unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn test_frontier_pops_lowest_f_first() {
        let mut heap = BinaryHeap::new();
        heap.push(FrontierEntry { idx: 0, f: 3.0 });
        heap.push(FrontierEntry { idx: 1, f: 1.0 });
        heap.push(FrontierEntry { idx: 2, f: 2.0 });

        let order: Vec<usize> = std::iter::from_fn(|| heap.pop()).map(|e| e.idx).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_reconstruct_reverses_parent_chain() {
        let mut arena = NodeArena::new();
        let a = arena.insert(SearchNode {
            pos: WorldPos::new(0.5, 0.5),
            tile: TilePos::new(0, 0),
            cost: 1.0,
            heuristic: 0.0,
            parent: None,
        });
        let b = arena.insert(SearchNode {
            pos: WorldPos::new(1.5, 0.5),
            tile: TilePos::new(1, 0),
            cost: 2.0,
            heuristic: 0.0,
            parent: Some(a),
        });
        let path = arena.reconstruct(b);
        assert_eq!(path, vec![WorldPos::new(0.5, 0.5), WorldPos::new(1.5, 0.5)]);
    }
}
