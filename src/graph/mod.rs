//! Capacitated graph primitives
//!
//! [`CapacityGraph`] is a directed, capacitated graph over a contiguous
//! node index set `{0, .., n-1}`. Unlike a general-purpose graph crate, it
//! guarantees a **fixed, repeatable iteration order over its edges** for
//! the lifetime of the handle: every dense vector the solver, the
//! congestion approximators, and the sparsifier pass around is indexed by
//! that order.
//!
//! ## Example: max flow setup
//!
//! ```rust
//! use sherman_flow::graph::CapacityGraph;
//!
//! let mut g = CapacityGraph::new(3);
//! g.add_edge(0, 1, 5.0).unwrap();
//! g.add_edge(1, 2, 3.0).unwrap();
//!
//! assert_eq!(g.num_nodes(), 3);
//! assert_eq!(g.num_edges(), 2);
//! ```

pub mod mst;

use crate::{Capacity, Error, Result};
use serde::{Deserialize, Serialize};

/// A node index, `0..num_nodes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// An edge index, in the graph's fixed iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl From<usize> for NodeId {
    fn from(i: usize) -> Self {
        NodeId(i)
    }
}

impl From<usize> for EdgeId {
    fn from(i: usize) -> Self {
        EdgeId(i)
    }
}

/// A capacitated directed graph with a fixed edge iteration order.
///
/// Edges of capacity `0` are silently dropped at ingest (`add_edge`
/// returns `Ok(None)`); negative, NaN, or infinite capacities are
/// rejected with `Error::InvalidInput`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityGraph {
    num_nodes: usize,
    from: Vec<NodeId>,
    to: Vec<NodeId>,
    capacity: Vec<Capacity>,
    out_adj: Vec<Vec<EdgeId>>,
    degree: Vec<usize>,
}

impl CapacityGraph {
    /// Create an empty graph over `num_nodes` nodes with no edges.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            from: Vec::new(),
            to: Vec::new(),
            capacity: Vec::new(),
            out_adj: vec![Vec::new(); num_nodes],
            degree: vec![0; num_nodes],
        }
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of (kept) edges.
    pub fn num_edges(&self) -> usize {
        self.capacity.len()
    }

    fn validate_node(&self, n: usize) -> Result<NodeId> {
        if n >= self.num_nodes {
            return Err(Error::invalid_input(format!(
                "node {n} out of range (graph has {} nodes)",
                self.num_nodes
            )));
        }
        Ok(NodeId(n))
    }

    /// Add a directed edge `from -> to` with the given capacity.
    ///
    /// Returns `Ok(None)` (no edge registered) if `capacity == 0`, per the
    /// "capacity > 0" invariant. Returns `Err` for negative, NaN, or
    /// infinite capacities, or for out-of-range endpoints.
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: Capacity) -> Result<Option<EdgeId>> {
        let from = self.validate_node(from)?;
        let to = self.validate_node(to)?;
        if capacity.is_nan() || capacity.is_infinite() {
            return Err(Error::invalid_input(format!(
                "edge capacity must be finite, got {capacity}"
            )));
        }
        if capacity < 0.0 {
            return Err(Error::invalid_input(format!(
                "edge capacity must be non-negative, got {capacity}"
            )));
        }
        if capacity == 0.0 {
            return Ok(None);
        }

        let id = EdgeId(self.capacity.len());
        self.from.push(from);
        self.to.push(to);
        self.capacity.push(capacity);
        self.out_adj[from.0].push(id);
        self.degree[from.0] += 1;
        self.degree[to.0] += 1;
        Ok(Some(id))
    }

    /// Endpoints of an edge, in `(from, to)` order.
    pub fn endpoints(&self, e: EdgeId) -> (NodeId, NodeId) {
        (self.from[e.0], self.to[e.0])
    }

    /// Capacity of an edge.
    pub fn capacity(&self, e: EdgeId) -> Capacity {
        self.capacity[e.0]
    }

    /// Outgoing edges of a node, in insertion order.
    pub fn out_edges(&self, n: NodeId) -> &[EdgeId] {
        &self.out_adj[n.0]
    }

    /// Total (in + out) degree of a node, counting multi-edges.
    pub fn degree(&self, n: NodeId) -> usize {
        self.degree[n.0]
    }

    /// Iterate over all edges in the graph's fixed order, as
    /// `(EdgeId, from, to, capacity)`.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, NodeId, NodeId, Capacity)> + '_ {
        (0..self.capacity.len()).map(move |i| (EdgeId(i), self.from[i], self.to[i], self.capacity[i]))
    }

    /// `C · x`: scale an edge-space vector by capacities.
    pub fn scale_by_capacity(&self, x: &[f64]) -> Vec<f64> {
        x.iter().zip(&self.capacity).map(|(xi, c)| xi * c).collect()
    }

    /// `C^-1 · x`: scale an edge-space vector by inverse capacities.
    pub fn scale_by_inverse_capacity(&self, x: &[f64]) -> Vec<f64> {
        x.iter().zip(&self.capacity).map(|(xi, c)| xi / c).collect()
    }

    /// `B · f`: the signed node-edge incidence map applied to an
    /// edge-space flow, `(Bf)_v = sum_{(u->v)} f - sum_{(v->u)} f`.
    pub fn incidence_apply(&self, f: &[f64]) -> Vec<f64> {
        let mut excess = vec![0.0; self.num_nodes];
        for (i, &fi) in f.iter().enumerate() {
            excess[self.from[i].0] -= fi;
            excess[self.to[i].0] += fi;
        }
        excess
    }

    /// `B^T · x`: the transpose incidence map applied to a node-space
    /// potential, producing an edge-space vector `(B^T x)_e = x_v - x_u`
    /// for `e = (u -> v)`.
    pub fn incidence_transpose_apply(&self, x: &[f64]) -> Vec<f64> {
        (0..self.capacity.len())
            .map(|i| -x[self.from[i].0] + x[self.to[i].0])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_edges_are_dropped() {
        let mut g = CapacityGraph::new(2);
        let e = g.add_edge(0, 1, 0.0).unwrap();
        assert!(e.is_none());
        assert_eq!(g.num_edges(), 0);
    }

    #[test]
    fn negative_and_nan_capacities_are_rejected() {
        let mut g = CapacityGraph::new(2);
        assert!(g.add_edge(0, 1, -1.0).is_err());
        assert!(g.add_edge(0, 1, f64::NAN).is_err());
        assert!(g.add_edge(0, 1, f64::INFINITY).is_err());
    }

    #[test]
    fn out_of_range_node_is_rejected() {
        let mut g = CapacityGraph::new(2);
        assert!(g.add_edge(0, 5, 1.0).is_err());
    }

    #[test]
    fn fixed_edge_order_matches_insertion() {
        let mut g = CapacityGraph::new(3);
        let e0 = g.add_edge(0, 1, 1.0).unwrap().unwrap();
        let e1 = g.add_edge(1, 2, 2.0).unwrap().unwrap();
        let order: Vec<_> = g.edges().map(|(id, ..)| id).collect();
        assert_eq!(order, vec![e0, e1]);
    }

    #[test]
    fn incidence_matches_manual_example() {
        // Grounded on sherman_test.py's test_compute_B (complete graph on
        // 5 nodes; adjacency order 0: (0,1)(0,2)(0,3)(0,4), 1: (1,2)...).
        let mut g = CapacityGraph::new(5);
        for u in 0..5 {
            for v in (u + 1)..5 {
                g.add_edge(u, v, 1.0).unwrap();
            }
        }
        let mut x = vec![0.0; g.num_edges()];
        x[0] = 2.0;
        x[1] = -1.2;
        x[2] = -0.1;
        let bx = g.incidence_apply(&x);
        assert_eq!(bx[0], -2.0 + 1.2 + 0.1);
        assert_eq!(bx[1], 2.0);
        assert_eq!(bx[2], -1.2);
        assert_eq!(bx[3], -0.1);

        let mut b = vec![0.0; g.num_nodes()];
        b[0] = 1.0;
        b[1] = -1.2;
        b[2] = -0.1;
        let bt = g.incidence_transpose_apply(&b);
        assert_eq!(bt[0], -1.0);
        assert_eq!(bt[1], 1.2);
        assert_eq!(bt[2], 0.1);
    }

    #[test]
    fn capacity_scaling() {
        let mut g = CapacityGraph::new(2);
        g.add_edge(0, 1, 12.0).unwrap();
        let x = vec![2.0];
        assert_eq!(g.scale_by_capacity(&x), vec![24.0]);
        assert_eq!(g.scale_by_inverse_capacity(&x), vec![2.0 / 12.0]);
    }
}
