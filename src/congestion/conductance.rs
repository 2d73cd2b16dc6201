//! Conductance congestion approximator: `R = diag(1/deg(v))`.

use super::CongestionApprox;
use crate::graph::{CapacityGraph, NodeId};

/// Diagonal congestion approximator: `R` multiplies each node's demand by
/// `1/deg(v)` (`0` for isolated nodes). `R` is its own transpose, since it
/// operates on vectors indexed by the same node space on both sides.
///
/// `alpha()` is hard-coded to `1.0`. This is carried over unchanged from
/// `examples/original_source/src/conductance_congestion_approx.py`, whose
/// own comment admits the value "probably isn't quite right" - the
/// correct bound involves graph conductance and is out of scope here (see
/// spec.md §9 and DESIGN.md's Open Decisions).
#[derive(Debug, Clone)]
pub struct ConductanceApprox {
    inv_degree: Vec<f64>,
}

impl ConductanceApprox {
    /// Build the approximator from a graph's per-node degrees.
    pub fn new(g: &CapacityGraph) -> Self {
        let inv_degree = (0..g.num_nodes())
            .map(|i| {
                let d = g.degree(NodeId(i));
                if d > 0 {
                    1.0 / d as f64
                } else {
                    0.0
                }
            })
            .collect();
        Self { inv_degree }
    }
}

impl CongestionApprox for ConductanceApprox {
    fn compute_dot(&self, b: &[f64]) -> Vec<f64> {
        b.iter().zip(&self.inv_degree).map(|(bi, d)| bi * d).collect()
    }

    fn compute_transpose_dot(&self, x: &[f64]) -> Vec<f64> {
        self.compute_dot(x)
    }

    fn alpha(&self) -> f64 {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_by_inverse_degree() {
        let mut g = CapacityGraph::new(3);
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(0, 2, 1.0).unwrap();
        let approx = ConductanceApprox::new(&g);
        // node 0 has degree 2, nodes 1 and 2 have degree 1.
        let rb = approx.compute_dot(&[2.0, 3.0, 4.0]);
        assert_eq!(rb, vec![1.0, 3.0, 4.0]);
    }

    #[test]
    fn isolated_node_maps_to_zero() {
        let g = CapacityGraph::new(2);
        let approx = ConductanceApprox::new(&g);
        assert_eq!(approx.compute_dot(&[5.0, -3.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn is_self_transpose() {
        let mut g = CapacityGraph::new(3);
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(1, 2, 1.0).unwrap();
        let approx = ConductanceApprox::new(&g);
        let x = vec![1.0, 2.0, 3.0];
        assert_eq!(approx.compute_dot(&x), approx.compute_transpose_dot(&x));
    }
}
