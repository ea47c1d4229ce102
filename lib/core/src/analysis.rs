use crate::{
    double_sweep, find_components, CatalogSnapshot, Error, Path, Report, Result, SimilarityGraph,
};
use std::time::Instant;
use tracing::{debug, info};

/// Limits checked before the rabbit hole search runs.
///
/// Both limits are off by default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub max_nodes: Option<usize>,
    pub max_edges: Option<usize>,
}

impl AnalysisConfig {
    fn check(&self, graph: &SimilarityGraph) -> Result<()> {
        if let Some(limit) = self.max_nodes {
            let actual = graph.node_count();
            if actual > limit {
                return Err(Error::BudgetExceeded {
                    what: "node count",
                    actual,
                    limit,
                });
            }
        }
        if let Some(limit) = self.max_edges {
            let actual = graph.edge_count();
            if actual > limit {
                return Err(Error::BudgetExceeded {
                    what: "edge count",
                    actual,
                    limit,
                });
            }
        }
        Ok(())
    }
}

/// Runs the full analysis over one snapshot.
///
/// Holds no graph state between runs; every call rebuilds the graph.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    #[must_use]
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, snapshot: &CatalogSnapshot) -> Result<Report> {
        let started = Instant::now();

        let graph = SimilarityGraph::build(snapshot.node_ids(), snapshot.edge_pairs());
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "similarity graph built"
        );

        self.config.check(&graph)?;
        let components = find_components(&graph);

        let paths: Vec<Path> = components
            .iter()
            .map(|component| double_sweep(&graph, component))
            .collect();

        let report = Report::assemble(&components, &paths, &snapshot.names());

        info!(
            islands = report.island_count(),
            longest = report.longest_rabbit_hole.length,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "graph analysis finished"
        );

        Ok(report)
    }
}
