// Analysis benchmarks over random catalogs
use catgraph_core::{double_sweep, find_components, Analyzer, CatalogSnapshot, Edge, Node, SimilarityGraph};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn generate_snapshot(nodes: usize, edges: usize) -> CatalogSnapshot {
    let mut rng = StdRng::seed_from_u64(42);
    let n = nodes as i64;

    let categories = (0..n)
        .map(|id| Node::new(id, format!("Category {}", id)))
        .collect();

    let mut pairs = Vec::with_capacity(edges);
    while pairs.len() < edges {
        let a = rng.random_range(0..n);
        let b = rng.random_range(0..n);
        if let Ok(edge) = Edge::new(a, b) {
            pairs.push(edge);
        }
    }

    CatalogSnapshot::new(categories, pairs)
}

fn benchmark_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");

    for size in [100, 1000, 10000].iter() {
        let snapshot = generate_snapshot(*size, size / 2 * 3);
        let analyzer = Analyzer::default();

        group.bench_with_input(BenchmarkId::new("catgraph", size), &snapshot, |b, snapshot| {
            b.iter(|| black_box(analyzer.run(snapshot).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_stages(c: &mut Criterion) {
    let snapshot = generate_snapshot(10000, 15000);
    let graph = SimilarityGraph::build(snapshot.node_ids(), snapshot.edge_pairs());
    let components = find_components(&graph);

    c.bench_function("build_graph_10k", |b| {
        b.iter(|| black_box(SimilarityGraph::build(snapshot.node_ids(), snapshot.edge_pairs())));
    });

    c.bench_function("find_components_10k", |b| {
        b.iter(|| black_box(find_components(&graph)));
    });

    c.bench_function("double_sweep_10k", |b| {
        b.iter(|| {
            for component in &components {
                black_box(double_sweep(&graph, component));
            }
        });
    });
}

criterion_group!(benches, benchmark_analyze, benchmark_stages);
criterion_main!(benches);
