//! Rabbit hole search.
//!
//! A rabbit hole is found with a breadth-first double sweep: sweep from the
//! smallest id of the island to its farthest node, then sweep again from
//! there and keep the second farthest path. On tree-shaped islands this is
//! the exact diameter. Islands with cycles get a lower bound on the longest
//! simple path, which is intentional: the exact search is NP-hard.

use crate::{Component, NodeId, SimilarityGraph};
use ahash::AHashMap;
use std::collections::VecDeque;

/// An ordered walk over distinct nodes where consecutive nodes are similar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    nodes: Vec<NodeId>,
}

impl Path {
    #[must_use]
    pub fn single(id: NodeId) -> Self {
        Self { nodes: vec![id] }
    }

    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of edges on the path; zero for a single node or no node.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

/// Breadth-first sweep from `start`, returning the path to the farthest node.
///
/// Neighbors are expanded in ascending order and a node only replaces the
/// current farthest one when it is strictly deeper, so among equally long
/// paths the first one discovered wins.
pub fn farthest_from(graph: &SimilarityGraph, start: NodeId) -> Path {
    let mut predecessor: AHashMap<NodeId, NodeId> = AHashMap::new();
    let mut depth: AHashMap<NodeId, usize> = AHashMap::new();
    let mut queue = VecDeque::new();

    depth.insert(start, 0);
    queue.push_back(start);

    let mut farthest = start;
    let mut farthest_depth = 0;

    while let Some(node) = queue.pop_front() {
        let next_depth = depth[&node] + 1;
        for neighbor in graph.neighbors(node) {
            if depth.contains_key(&neighbor) {
                continue;
            }
            depth.insert(neighbor, next_depth);
            predecessor.insert(neighbor, node);
            queue.push_back(neighbor);

            if next_depth > farthest_depth {
                farthest = neighbor;
                farthest_depth = next_depth;
            }
        }
    }

    let mut nodes = Vec::with_capacity(farthest_depth + 1);
    let mut cursor = farthest;
    nodes.push(cursor);
    while let Some(&prev) = predecessor.get(&cursor) {
        nodes.push(prev);
        cursor = prev;
    }
    nodes.reverse();

    Path { nodes }
}

/// Candidate rabbit hole of one island.
pub fn double_sweep(graph: &SimilarityGraph, component: &Component) -> Path {
    let start = component.min_id();
    if component.is_singleton() {
        return Path::single(start);
    }

    let first = farthest_from(graph, start);
    let pivot = first.last().unwrap_or(start);
    let second = farthest_from(graph, pivot);

    tracing::trace!(
        start,
        pivot,
        length = second.len(),
        "double sweep finished"
    );

    second
}
