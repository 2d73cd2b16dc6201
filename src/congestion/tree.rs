//! Tree congestion approximator: routes node demands along a maximum
//! spanning tree's unique tree paths.
//!
//! Grounded on `examples/original_source/src/tree_congestion_approx.py`
//! and `mst_congestion_approx.py`. The tree's DFS edge order is cached
//! once at construction (spec.md §3's "cached DFS edge order" invariant)
//! by [`crate::graph::mst::maximum_spanning_tree`].

use super::CongestionApprox;
use crate::graph::mst::{maximum_spanning_tree, SpanningTree};
use crate::graph::CapacityGraph;
use crate::Result;

/// Congestion approximator backed by a spanning tree: `R·b` pushes each
/// node's demand up to the root along the tree (unique tree flow), and
/// `Rᵀ·x` accumulates edge potentials down from the root.
#[derive(Debug, Clone)]
pub struct TreeApprox {
    tree: SpanningTree,
    num_nodes: usize,
    alpha: f64,
}

impl TreeApprox {
    /// Build a tree approximator from an already-computed spanning tree
    /// and an explicit stretch bound `alpha`.
    pub fn new(tree: SpanningTree, num_nodes: usize, alpha: f64) -> Self {
        Self { tree, num_nodes, alpha }
    }

    /// Build the "MST congestion approximator": the maximum-capacity
    /// spanning tree of `g`, with `alpha` set to `g`'s own edge count - a
    /// coarse stretch bound, not the tight tree-stretch value (spec.md
    /// §4.4 / §9's documented open question).
    pub fn from_graph(g: &CapacityGraph) -> Result<Self> {
        let tree = maximum_spanning_tree(g)?;
        let alpha = g.num_edges() as f64;
        Ok(Self::new(tree, g.num_nodes(), alpha))
    }

    /// Push each child's accumulated excess up to its parent in reverse
    /// DFS order, returning the flow on each tree edge in forward DFS
    /// order. This is the unique flow routing `demands` on the tree.
    fn route_flow(&self, demands: &[f64]) -> Vec<f64> {
        let mut node_flow = demands.to_vec();
        let edges = self.tree.dfs_edges();
        let mut edge_flow = vec![0.0; edges.len()];
        for (i, &(parent, child, _)) in edges.iter().enumerate().rev() {
            let child_flow = node_flow[child.0];
            node_flow[parent.0] += child_flow;
            edge_flow[i] = child_flow;
        }
        edge_flow
    }

    /// Accumulate edge potentials from the root down, producing a
    /// per-node potential vector (root potential `0`).
    fn compute_node_potentials(&self, edge_potentials: &[f64]) -> Vec<f64> {
        let mut node_potentials = vec![0.0; self.num_nodes];
        for (&(parent, child, _), &potential) in self.tree.dfs_edges().iter().zip(edge_potentials) {
            node_potentials[child.0] = node_potentials[parent.0] + potential;
        }
        node_potentials
    }
}

impl CongestionApprox for TreeApprox {
    fn compute_dot(&self, b: &[f64]) -> Vec<f64> {
        let flow = self.route_flow(b);
        flow.iter()
            .zip(self.tree.dfs_edges())
            .map(|(f, &(_, _, cap))| f / cap / self.alpha())
            .collect()
    }

    fn compute_transpose_dot(&self, x: &[f64]) -> Vec<f64> {
        let edge_potentials: Vec<f64> = x
            .iter()
            .zip(self.tree.dfs_edges())
            .map(|(xi, &(_, _, cap))| xi / cap)
            .collect();
        self.compute_node_potentials(&edge_potentials)
            .into_iter()
            .map(|p| p / self.alpha())
            .collect()
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }
}
