// Similarity graph - categories as nodes, similarity pairs as undirected edges
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub type NodeId = i64;

/// A category as seen by the analysis: an id and a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
}

impl Node {
    #[inline]
    #[must_use]
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// An unordered similarity pair, stored as `(min, max)`.
///
/// Serialized as a two-element array. A pair naming the same id twice is
/// rejected on construction and on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "(NodeId, NodeId)", into = "(NodeId, NodeId)")]
pub struct Edge {
    a: NodeId,
    b: NodeId,
}

impl Edge {
    pub fn new(a: NodeId, b: NodeId) -> Result<Self> {
        if a == b {
            return Err(Error::SelfSimilarity(a));
        }
        Ok(Self {
            a: a.min(b),
            b: a.max(b),
        })
    }

    #[inline]
    #[must_use]
    pub fn a(&self) -> NodeId {
        self.a
    }

    #[inline]
    #[must_use]
    pub fn b(&self) -> NodeId {
        self.b
    }

    #[inline]
    #[must_use]
    pub fn pair(&self) -> (NodeId, NodeId) {
        (self.a, self.b)
    }

    #[inline]
    #[must_use]
    pub fn touches(&self, id: NodeId) -> bool {
        self.a == id || self.b == id
    }

    /// The endpoint that is not `id`, if `id` is an endpoint.
    #[inline]
    #[must_use]
    pub fn other(&self, id: NodeId) -> Option<NodeId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }
}

impl TryFrom<(NodeId, NodeId)> for Edge {
    type Error = Error;

    fn try_from((a, b): (NodeId, NodeId)) -> Result<Self> {
        Edge::new(a, b)
    }
}

impl From<Edge> for (NodeId, NodeId) {
    fn from(edge: Edge) -> Self {
        edge.pair()
    }
}

/// Undirected adjacency keyed by node id.
///
/// Keys and neighbor sets are ordered, so every traversal over the graph
/// visits nodes in ascending id order. Neighbor membership is always mutual.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimilarityGraph {
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl SimilarityGraph {
    /// Build a graph from the full node id set and the similarity pairs.
    ///
    /// Every id in `node_ids` gets an entry even without edges. Edge
    /// endpoints missing from `node_ids` are added as nodes too. Repeated
    /// pairs collapse into one edge and a pair `(x, x)` is skipped.
    pub fn build<N, E>(node_ids: N, edges: E) -> Self
    where
        N: IntoIterator<Item = NodeId>,
        E: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut adjacency: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
        for id in node_ids {
            adjacency.entry(id).or_default();
        }

        for (a, b) in edges {
            if a == b {
                tracing::warn!(node = a, "dropping self-similarity pair");
                adjacency.entry(a).or_default();
                continue;
            }
            adjacency.entry(a).or_default().insert(b);
            adjacency.entry(b).or_default().insert(a);
        }

        Self { adjacency }
    }

    /// Node ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Neighbors of `id` in ascending order; empty for unknown ids.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.get(&id).into_iter().flatten().copied()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.adjacency.contains_key(&id)
    }

    #[inline]
    #[must_use]
    pub fn degree(&self, id: NodeId) -> usize {
        self.adjacency.get(&id).map_or(0, BTreeSet::len)
    }

    #[inline]
    #[must_use]
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency.get(&a).is_some_and(|n| n.contains(&b))
    }

    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}
