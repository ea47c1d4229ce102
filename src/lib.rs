//! # catgraph
//!
//! Similarity graph analysis for a category catalog.
//!
//! Categories are linked by symmetric "similar to" pairs. catgraph splits
//! the resulting graph into rabbit islands (connected groups) and finds the
//! longest rabbit hole (chain of similarities) with a breadth-first double
//! sweep.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! catgraph analyze --snapshot catalog.json --output graph_report.json
//! catgraph --data-dir ./data serve --http-port 8000
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use catgraph::prelude::*;
//!
//! let snapshot = CatalogSnapshot::new(
//!     vec![Node::new(1, "A"), Node::new(2, "B"), Node::new(3, "C"), Node::new(4, "D")],
//!     vec![Edge::new(1, 2).unwrap(), Edge::new(2, 3).unwrap(), Edge::new(3, 4).unwrap()],
//! );
//!
//! let report = Analyzer::default().run(&snapshot).unwrap();
//! assert_eq!(report.longest_rabbit_hole.length, 3);
//! assert_eq!(report.rabbit_islands.len(), 1);
//! ```
//!
//! ## Crate Structure
//!
//! - [`catgraph-core`](https://docs.rs/catgraph-core) - Graph, islands, rabbit holes, report
//! - [`catgraph-storage`](https://docs.rs/catgraph-storage) - Catalog store and report export
//! - [`catgraph-api`](https://docs.rs/catgraph-api) - REST API
//!
//! ## Notes
//!
//! The double sweep gives the exact longest path only on islands without
//! cycles. On cyclic islands the reported length is a lower bound.

// Re-export core types
pub use catgraph_core::{
    AnalysisConfig, Analyzer, CatalogSnapshot,
    Edge, Node, NodeId, SimilarityGraph,
    Component, Path, Report, RabbitHole, NamedNode, NameResolver,
    Error, Result,
};

// Re-export storage
pub use catgraph_storage::{
    analyze_snapshot, AnalyzeError, CatalogStore, ReportExporter, StorageManager,
    DEFAULT_REPORT_FILE,
};

// Re-export API
pub use catgraph_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AnalysisConfig, Analyzer, CatalogSnapshot,
        Edge, Node, NodeId,
        Report,
        Error, Result,
        CatalogStore, ReportExporter, StorageManager,
        RestApi,
    };
}

/// Graph algorithms used by the analysis
pub mod algo {
    pub use catgraph_core::{double_sweep, farthest_from, find_components};
}
