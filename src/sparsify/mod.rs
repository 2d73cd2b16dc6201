//! Benczúr-Karger cut sparsification: reduce an `n`-node, `m`-edge graph
//! to `O(n log n)` edges while preserving every cut's value within a
//! `(1 ± ε)` factor, with high probability.
//!
//! "Randomized Approximation Schemes for Cuts and Flows in Capacitated
//! Graphs", András Benczúr, David Karger, 2008. Grounded on
//! `examples/original_source/src/sparsification.py`'s top-level
//! `sparsify`/`weighted_sparsify` entry points, which this module's
//! [`sparsify`] and [`weighted_sparsify`] implement directly; the
//! supporting Nagamochi-Ibaraki and window-estimation machinery lives in
//! [`nagamochi`] and [`window`].

pub mod multigraph;
pub mod nagamochi;
pub mod window;

pub use multigraph::Multigraph;

use crate::graph::CapacityGraph;
use crate::{Error, Result};
use rand::Rng;

/// Sparsify a graph whose edges all share (approximately) one capacity
/// scale, using the cheaper `estimation(g, 1)` edge-strength estimator.
/// Mirrors `sparsify`.
pub fn sparsify(g: &CapacityGraph, epsilon: f64, d: f64, rng: &mut impl Rng) -> Result<CapacityGraph> {
    let mg = Multigraph::from_capacity_graph(g);
    let strength = window::estimation(&mg, 1.0);
    build_sparsified(g, &strength, epsilon, d, rng)
}

/// Sparsify a graph whose edge capacities span a wide range, using the
/// `window_estimation` edge-strength estimator. Mirrors
/// `weighted_sparsify`.
pub fn weighted_sparsify(g: &CapacityGraph, epsilon: f64, d: f64, rng: &mut impl Rng) -> Result<CapacityGraph> {
    let mg = Multigraph::from_capacity_graph(g);
    let strength = window::window_estimation(&mg);
    build_sparsified(g, &strength, epsilon, d, rng)
}

fn build_sparsified(
    g: &CapacityGraph,
    edge_strength: &std::collections::HashMap<(usize, usize), f64>,
    epsilon: f64,
    d: f64,
    rng: &mut impl Rng,
) -> Result<CapacityGraph> {
    if epsilon <= 0.0 {
        return Err(Error::invalid_input(format!("epsilon must be positive, got {epsilon}")));
    }
    let n = g.num_nodes();
    let compression_factor = 3.0 * (d + 4.0) * (n as f64).max(2.0).ln() / (epsilon * epsilon);

    let mut out = CapacityGraph::new(n);
    for (_, from, to, capacity) in g.edges() {
        let strength = edge_strength
            .get(&(from.0, to.0))
            .or_else(|| edge_strength.get(&(to.0, from.0)))
            .copied()
            .ok_or_else(|| Error::invalid_input("edge missing from strength estimate"))?;
        let p_e = (compression_factor * capacity / strength).min(1.0);
        if p_e != 1.0 && rng.gen::<f64>() > p_e {
            continue;
        }
        out.add_edge(from.0, to.0, capacity / p_e)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn sparsify_preserves_node_count_and_rejects_bad_epsilon() {
        let mut g = CapacityGraph::new(6);
        for u in 0..6 {
            for v in (u + 1)..6 {
                g.add_edge(u, v, 1.0).unwrap();
            }
        }
        let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
        let sparse = sparsify(&g, 0.5, 0.5, &mut rng).unwrap();
        assert_eq!(sparse.num_nodes(), g.num_nodes());
        assert!(sparse.num_edges() <= g.num_edges());

        let mut rng2 = rand::rngs::SmallRng::seed_from_u64(7);
        assert!(sparsify(&g, 0.0, 0.5, &mut rng2).is_err());
    }

    #[test]
    fn weighted_sparsify_handles_varied_capacities() {
        let mut g = CapacityGraph::new(5);
        g.add_edge(0, 1, 100.0).unwrap();
        g.add_edge(1, 2, 1.0).unwrap();
        g.add_edge(2, 3, 50.0).unwrap();
        g.add_edge(3, 4, 0.5).unwrap();
        g.add_edge(4, 0, 10.0).unwrap();
        let mut rng = rand::rngs::SmallRng::seed_from_u64(3);
        let sparse = weighted_sparsify(&g, 0.5, 0.5, &mut rng).unwrap();
        assert_eq!(sparse.num_nodes(), g.num_nodes());
    }
}
