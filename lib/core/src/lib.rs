//! # catgraph Core
//!
//! Core library for the catgraph similarity analysis.
//!
//! This crate turns a snapshot of categories and similarity pairs into a
//! report of rabbit islands and the longest rabbit hole:
//!
//! - [`SimilarityGraph`] - Ordered, symmetric adjacency built from a snapshot
//! - [`find_components`] - Breadth-first partition into islands
//! - [`double_sweep`] - Two-pass breadth-first rabbit hole search per island
//! - [`Report`] - Longest rabbit hole plus every island, with names
//! - [`Analyzer`] - The whole pipeline over one [`CatalogSnapshot`]
//!
//! ## Example
//!
//! ```rust
//! use catgraph_core::{Analyzer, CatalogSnapshot, Edge, Node};
//!
//! let snapshot = CatalogSnapshot::new(
//!     vec![Node::new(1, "Fruits"), Node::new(2, "Citrus"), Node::new(3, "Dairy")],
//!     vec![Edge::new(1, 2).unwrap()],
//! );
//!
//! let report = Analyzer::default().run(&snapshot).unwrap();
//! assert_eq!(report.longest_rabbit_hole.length, 1);
//! assert_eq!(report.rabbit_islands.len(), 2);
//! ```

pub mod analysis;
pub mod components;
pub mod error;
pub mod graph;
pub mod path;
pub mod report;
pub mod snapshot;

pub use analysis::{AnalysisConfig, Analyzer};
pub use components::{find_components, Component};
pub use error::{Error, Result};
pub use graph::{Edge, Node, NodeId, SimilarityGraph};
pub use path::{double_sweep, farthest_from, Path};
pub use report::{unknown_label, NameResolver, NamedNode, RabbitHole, Report};
pub use snapshot::CatalogSnapshot;
