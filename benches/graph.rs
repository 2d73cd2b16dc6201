//! Benchmarks for the Sherman solver's core routing loop.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sherman_flow::congestion::ConductanceApprox;
use sherman_flow::graph::CapacityGraph;
use sherman_flow::solver::Solver;

fn random_graph(nodes: usize, edges: usize, seed: u64) -> CapacityGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = CapacityGraph::new(nodes);
    let mut added = 0;
    while added < edges {
        let from = rng.gen_range(0..nodes);
        let to = rng.gen_range(0..nodes);
        if from != to {
            let capacity = rng.gen_range(1..100) as f64;
            if g.add_edge(from, to, capacity).unwrap().is_some() {
                added += 1;
            }
        }
    }
    g
}

fn bench_almost_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("almost_route");

    for (nodes, edges) in [(50, 150), (100, 400), (200, 900)] {
        let graph = random_graph(nodes, edges, 42);
        let approx = ConductanceApprox::new(&graph);
        let solver = Solver::new(&graph, approx);
        let mut demands = vec![0.0; nodes];
        demands[0] = -1.0;
        demands[nodes - 1] = 1.0;

        group.bench_with_input(BenchmarkId::new("nodes", nodes), &solver, |b, s| {
            b.iter(|| s.almost_route(black_box(&demands), black_box(0.5)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_almost_route);
criterion_main!(benches);
