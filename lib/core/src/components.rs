use crate::{NodeId, SimilarityGraph};
use ahash::AHashSet;
use std::collections::VecDeque;

/// A rabbit island: a maximal connected set of categories.
///
/// Members are kept sorted ascending and the set is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    members: Vec<NodeId>,
}

impl Component {
    fn from_unsorted(mut members: Vec<NodeId>) -> Self {
        members.sort_unstable();
        Self { members }
    }

    #[inline]
    #[must_use]
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    /// Smallest member id, used as the deterministic sweep start.
    #[inline]
    #[must_use]
    pub fn min_id(&self) -> NodeId {
        self.members[0]
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.members.binary_search(&id).is_ok()
    }
}

/// Partition the graph into connected components.
///
/// Seeds are taken in ascending id order, so the first component always
/// holds the smallest id, the second the smallest id not in the first, and
/// so on. The components are disjoint and together cover every node.
pub fn find_components(graph: &SimilarityGraph) -> Vec<Component> {
    let mut visited: AHashSet<NodeId> = AHashSet::with_capacity(graph.node_count());
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for seed in graph.node_ids() {
        if !visited.insert(seed) {
            continue;
        }

        let mut members = vec![seed];
        queue.push_back(seed);

        while let Some(node) = queue.pop_front() {
            for neighbor in graph.neighbors(node) {
                if visited.insert(neighbor) {
                    members.push(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }

        components.push(Component::from_unsorted(members));
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn members(components: &[Component]) -> Vec<Vec<NodeId>> {
        components.iter().map(|c| c.members().to_vec()).collect()
    }

    #[test]
    fn test_no_edges_gives_singletons() {
        let graph = SimilarityGraph::build([3, 1, 2], []);
        let components = find_components(&graph);
        assert_eq!(members(&components), vec![vec![1], vec![2], vec![3]]);
        assert!(components.iter().all(Component::is_singleton));
    }

    #[test]
    fn test_components_ordered_by_smallest_member() {
        let graph = SimilarityGraph::build(1..=6, [(6, 2), (1, 5), (5, 3)]);
        let components = find_components(&graph);
        assert_eq!(
            members(&components),
            vec![vec![1, 3, 5], vec![2, 6], vec![4]]
        );
        assert_eq!(components[1].min_id(), 2);
    }

    #[test]
    fn test_empty_graph() {
        let graph = SimilarityGraph::default();
        assert!(find_components(&graph).is_empty());
    }

    #[test]
    fn test_random_graphs_are_partitioned() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..50 {
            let n: NodeId = rng.random_range(1..40);
            let edge_count = rng.random_range(0..60);
            let mut edges = Vec::new();
            for _ in 0..edge_count {
                let a = rng.random_range(0..n);
                let b = rng.random_range(0..n);
                if a != b {
                    edges.push((a, b));
                }
            }

            let graph = SimilarityGraph::build(0..n, edges.iter().copied());
            let components = find_components(&graph);

            let mut seen = AHashSet::new();
            for component in &components {
                for &id in component.members() {
                    assert!(seen.insert(id), "node {id} in two components");
                }
            }
            assert_eq!(seen.len(), n as usize);

            for &(a, b) in &edges {
                let island = components.iter().find(|c| c.contains(a)).unwrap();
                assert!(island.contains(b), "edge {a}-{b} crosses islands");
            }
        }
    }
}
