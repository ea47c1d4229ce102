// Read-only input of one analysis run
use crate::{Edge, Error, Node, NodeId, Result};
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// One consistent view of the catalog: every category and every similarity
/// pair, taken together.
///
/// The hierarchical category tree is expected to be acyclic; that is kept
/// by whoever owns the tree and is not checked here. Self-similar pairs
/// cannot be represented (see [`Edge::new`]). Edges may name ids missing
/// from `nodes`; those show up in the report with a placeholder name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl CatalogSnapshot {
    #[must_use]
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Parse a snapshot document: `{"nodes": [{"id", "name"}], "edges": [[a, b]]}`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let snapshot: Self = serde_json::from_reader(reader)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Reject a snapshot that lists the same category id twice.
    pub fn validate(&self) -> Result<()> {
        let mut seen = AHashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.id) {
                return Err(Error::InvalidSnapshot(format!(
                    "category {} listed more than once",
                    node.id
                )));
            }
        }
        Ok(())
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    pub fn edge_pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.edges.iter().map(Edge::pair)
    }

    /// Id to name lookup for report assembly.
    #[must_use]
    pub fn names(&self) -> AHashMap<NodeId, String> {
        self.nodes.iter().map(|n| (n.id, n.name.clone())).collect()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
