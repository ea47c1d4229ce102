use crate::{Component, Node, NodeId, Path};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Resolves category ids to display names for the report.
pub trait NameResolver {
    fn resolve(&self, id: NodeId) -> Option<&str>;

    /// The name for `id`, or `[Unknown:<id>]` if the id is not known.
    fn display_name(&self, id: NodeId) -> String {
        match self.resolve(id) {
            Some(name) => name.to_string(),
            None => unknown_label(id),
        }
    }
}

/// Placeholder used for ids without a known name.
pub fn unknown_label(id: NodeId) -> String {
    format!("[Unknown:{}]", id)
}

impl NameResolver for AHashMap<NodeId, String> {
    fn resolve(&self, id: NodeId) -> Option<&str> {
        self.get(&id).map(String::as_str)
    }
}

impl NameResolver for HashMap<NodeId, String> {
    fn resolve(&self, id: NodeId) -> Option<&str> {
        self.get(&id).map(String::as_str)
    }
}

impl NameResolver for BTreeMap<NodeId, String> {
    fn resolve(&self, id: NodeId) -> Option<&str> {
        self.get(&id).map(String::as_str)
    }
}

impl NameResolver for [Node] {
    fn resolve(&self, id: NodeId) -> Option<&str> {
        self.iter().find(|n| n.id == id).map(|n| n.name.as_str())
    }
}

/// A category id with its resolved name, as it appears in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedNode {
    pub id: NodeId,
    pub name: String,
}

impl NamedNode {
    fn resolve<R: NameResolver + ?Sized>(id: NodeId, names: &R) -> Self {
        Self {
            id,
            name: names.display_name(id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RabbitHole {
    pub length: usize,
    pub path: Vec<NamedNode>,
}

/// Result of one analysis run.
///
/// Field order is part of the exported document format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub longest_rabbit_hole: RabbitHole,
    pub rabbit_islands: Vec<Vec<NamedNode>>,
}

impl Report {
    /// Pick the longest candidate path and name every island.
    ///
    /// `paths[i]` is the candidate for `components[i]`. The longest path
    /// wins; on equal length the earlier component keeps it.
    pub fn assemble<R>(components: &[Component], paths: &[Path], names: &R) -> Self
    where
        R: NameResolver + ?Sized,
    {
        debug_assert_eq!(components.len(), paths.len());

        let mut longest: Option<&Path> = None;
        for path in paths {
            if longest.map_or(true, |best| path.len() > best.len()) {
                longest = Some(path);
            }
        }

        let longest_rabbit_hole = match longest {
            Some(path) => RabbitHole {
                length: path.len(),
                path: path
                    .nodes()
                    .iter()
                    .map(|&id| NamedNode::resolve(id, names))
                    .collect(),
            },
            None => RabbitHole::default(),
        };

        let rabbit_islands = components
            .iter()
            .map(|component| {
                component
                    .members()
                    .iter()
                    .map(|&id| NamedNode::resolve(id, names))
                    .collect()
            })
            .collect();

        Self {
            longest_rabbit_hole,
            rabbit_islands,
        }
    }

    #[inline]
    #[must_use]
    pub fn island_count(&self) -> usize {
        self.rabbit_islands.len()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.rabbit_islands.iter().map(Vec::len).sum()
    }
}
