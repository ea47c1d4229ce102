// Integration tests for catgraph
use catgraph::algo::find_components;
use catgraph::{
    analyze_snapshot, AnalysisConfig, Analyzer, CatalogSnapshot, CatalogStore, Edge, Node,
    NodeId, Report, ReportExporter, SimilarityGraph, StorageManager,
};
use std::sync::Arc;

fn snapshot(nodes: &[(NodeId, &str)], edges: &[(NodeId, NodeId)]) -> CatalogSnapshot {
    CatalogSnapshot::new(
        nodes.iter().map(|&(id, name)| Node::new(id, name)).collect(),
        edges.iter().map(|&(a, b)| Edge::new(a, b).unwrap()).collect(),
    )
}

fn ids(report: &Report) -> Vec<NodeId> {
    report.longest_rabbit_hole.path.iter().map(|n| n.id).collect()
}

#[test]
fn test_zero_edges() {
    let snap = snapshot(&[(1, "Fruits"), (2, "Vegetables"), (3, "Dairy"), (4, "Bakery")], &[]);
    let report = Analyzer::default().run(&snap).unwrap();

    assert_eq!(report.rabbit_islands.len(), 4);
    assert!(report.rabbit_islands.iter().all(|island| island.len() == 1));
    assert_eq!(report.longest_rabbit_hole.length, 0);
}

#[test]
fn test_path_graph() {
    let snap = snapshot(
        &[(1, "A"), (2, "B"), (3, "C"), (4, "D")],
        &[(1, 2), (2, 3), (3, 4)],
    );
    let report = Analyzer::default().run(&snap).unwrap();

    assert_eq!(report.rabbit_islands.len(), 1);
    assert_eq!(report.rabbit_islands[0].len(), 4);
    assert_eq!(report.longest_rabbit_hole.length, 3);

    let mut visited = ids(&report);
    visited.sort_unstable();
    assert_eq!(visited, vec![1, 2, 3, 4]);
}

#[test]
fn test_star_graph() {
    let snap = snapshot(
        &[(1, "A"), (2, "B"), (3, "C"), (10, "X")],
        &[(10, 1), (10, 2), (10, 3)],
    );
    let report = Analyzer::default().run(&snap).unwrap();

    assert_eq!(report.rabbit_islands.len(), 1);
    assert_eq!(report.longest_rabbit_hole.length, 2);
    assert_eq!(ids(&report)[1], 10);
}

#[test]
fn test_two_disjoint_edges() {
    let snap = snapshot(&[(1, "A"), (2, "B"), (3, "C"), (4, "D")], &[(1, 2), (3, 4)]);
    let report = Analyzer::default().run(&snap).unwrap();

    assert_eq!(report.rabbit_islands.len(), 2);
    assert!(report.rabbit_islands.iter().all(|island| island.len() == 2));
    assert_eq!(report.longest_rabbit_hole.length, 1);
    assert_eq!(ids(&report), vec![2, 1]);
}

#[test]
fn test_empty_catalog() {
    let report = Analyzer::default().run(&CatalogSnapshot::default()).unwrap();
    assert_eq!(report, Report::default());
    assert_eq!(
        ReportExporter::to_document(&report).unwrap(),
        "{\n  \"longest_rabbit_hole\": {\n    \"length\": 0,\n    \"path\": []\n  },\n  \"rabbit_islands\": []\n}"
    );
}

#[test]
fn test_unknown_id_is_labeled() {
    let snap = snapshot(&[(1, "Fruits"), (2, "Citrus")], &[(1, 2), (2, 77)]);
    let report = Analyzer::default().run(&snap).unwrap();

    let island = &report.rabbit_islands[0];
    assert_eq!(island.len(), 3);
    assert_eq!(island[2].id, 77);
    assert_eq!(island[2].name, "[Unknown:77]");
    assert_eq!(report.longest_rabbit_hole.length, 2);
}

#[test]
fn test_islands_partition_nodes() {
    let edges = [(1, 2), (2, 3), (4, 5), (6, 7), (7, 8), (8, 6), (9, 10)];
    let nodes: Vec<(NodeId, String)> = (1..=12).map(|id| (id, format!("Category {}", id))).collect();
    let nodes: Vec<(NodeId, &str)> = nodes.iter().map(|(id, n)| (*id, n.as_str())).collect();
    let snap = snapshot(&nodes, &edges);
    let report = Analyzer::default().run(&snap).unwrap();

    let mut all: Vec<NodeId> = report
        .rabbit_islands
        .iter()
        .flat_map(|island| island.iter().map(|n| n.id))
        .collect();
    all.sort_unstable();
    assert_eq!(all, (1..=12).collect::<Vec<_>>());

    for &(a, b) in &edges {
        let island = report
            .rabbit_islands
            .iter()
            .find(|island| island.iter().any(|n| n.id == a))
            .unwrap();
        assert!(island.iter().any(|n| n.id == b));
    }

    let graph = SimilarityGraph::build(snap.node_ids(), snap.edge_pairs());
    assert_eq!(find_components(&graph).len(), report.rabbit_islands.len());
}

#[test]
fn test_analyze_snapshot_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = ReportExporter::new(dir.path().join("graph_report.json"));
    let snap = snapshot(
        &[(1, "Fruits"), (2, "Citrus"), (3, "Tropical"), (4, "Dairy"), (5, "Cheeses")],
        &[(1, 2), (1, 3), (2, 3), (4, 5)],
    );
    let analyzer = Analyzer::default();

    let (path, first_report) = analyze_snapshot(&snap, &analyzer, &exporter).unwrap();
    let first = std::fs::read(&path).unwrap();
    let (_, second_report) = analyze_snapshot(&snap, &analyzer, &exporter).unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_report, second_report);
}

#[test]
fn test_snapshot_file_round_trip() {
    let json = r#"{
        "nodes": [
            {"id": 1, "name": "Fruits"},
            {"id": 11, "name": "Citrus Fruits"},
            {"id": 12, "name": "Tropical Fruits"}
        ],
        "edges": [[11, 1], [1, 12], [12, 1]]
    }"#;
    let snap = CatalogSnapshot::from_json_str(json).unwrap();
    let report = Analyzer::default().run(&snap).unwrap();

    assert_eq!(report.longest_rabbit_hole.length, 2);
    let names: Vec<&str> = report
        .longest_rabbit_hole
        .path
        .iter()
        .map(|n| n.name.as_str())
        .collect();
    assert_eq!(names, vec!["Citrus Fruits", "Fruits", "Tropical Fruits"]);
}

#[test]
fn test_storage_manager_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let storage = StorageManager::new(dir.path()).unwrap();
    for name in ["Fruits", "Vegetables", "Citrus", "Roots"] {
        storage.catalog().add_category(name).unwrap();
    }
    storage.catalog().add_similarity(1, 3).unwrap();
    storage.catalog().add_similarity(2, 4).unwrap();
    assert!(storage.catalog().add_similarity(4, 4).is_err());

    let (path, report) = storage.analyze().unwrap();
    assert!(path.exists());
    assert_eq!(report.rabbit_islands.len(), 2);
    assert_eq!(report.longest_rabbit_hole.length, 1);

    storage.catalog().remove_category(3).unwrap();
    let (_, report) = storage.analyze().unwrap();
    assert_eq!(report.rabbit_islands.len(), 2);
    assert_eq!(report.rabbit_islands[0].len(), 1);
    assert_eq!(ids(&report), vec![4, 2]);
}

#[test]
fn test_budget_blocks_large_graphs() {
    let catalog = Arc::new(CatalogStore::in_memory());
    for i in 0..5 {
        catalog.add_category(format!("Category {}", i)).unwrap();
    }
    let dir = tempfile::tempdir().unwrap();
    let storage = StorageManager::from_parts(
        catalog,
        Analyzer::new(AnalysisConfig {
            max_nodes: Some(4),
            max_edges: None,
        }),
        ReportExporter::new(dir.path().join("graph_report.json")),
    );

    assert!(storage.analyze().is_err());
    assert!(!storage.exporter().path().exists());
}

#[test]
fn test_document_matches_report() {
    let snap = snapshot(&[(1, "Fruits"), (2, "Citrus"), (3, "Dairy")], &[(1, 2)]);
    let report = Analyzer::default().run(&snap).unwrap();
    let document = ReportExporter::to_document(&report).unwrap();

    let value: serde_json::Value = serde_json::from_str(&document).unwrap();
    assert_eq!(value["longest_rabbit_hole"]["length"], 1);
    assert_eq!(
        value["longest_rabbit_hole"]["path"],
        serde_json::json!([{"id": 2, "name": "Citrus"}, {"id": 1, "name": "Fruits"}])
    );
    assert_eq!(
        value["rabbit_islands"],
        serde_json::json!([
            [{"id": 1, "name": "Fruits"}, {"id": 2, "name": "Citrus"}],
            [{"id": 3, "name": "Dairy"}]
        ])
    );
}

#[test]
fn test_import_then_analyze() {
    let dir = tempfile::tempdir().unwrap();
    let snap = CatalogSnapshot::from_json_str(
        r#"{"nodes": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}, {"id": 3, "name": "C"}],
            "edges": [[1, 2], [2, 3]]}"#,
    )
    .unwrap();

    let storage = StorageManager::new(dir.path()).unwrap();
    assert_eq!(storage.catalog().import(snap).unwrap(), 2);
    drop(storage);

    let storage = StorageManager::new(dir.path()).unwrap();
    let (_, report) = storage.analyze().unwrap();
    assert_eq!(report.longest_rabbit_hole.length, 2);

    let dangling = CatalogSnapshot::from_json_str(
        r#"{"nodes": [{"id": 4, "name": "D"}], "edges": [[3, 4], [4, 77]]}"#,
    )
    .unwrap();
    assert!(storage.catalog().import(dangling).is_err());
    assert_eq!(storage.catalog().category_count(), 3);
    assert_eq!(storage.catalog().similarity_count(), 2);
}
