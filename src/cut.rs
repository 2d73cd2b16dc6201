//! Cut extraction from a residual flow.
//!
//! Grounded on `examples/original_source/src/graph_util.py`'s
//! `cut_from_residuals` and `approx_min_cut_from_residuals`: given a flow
//! and its residual capacities, the set of nodes reachable from a source
//! in the residual graph determines an `(s, ·)`-cut whose edges are
//! exactly the original edges crossing from the reachable set to its
//! complement.

use crate::graph::{CapacityGraph, NodeId};

/// An edge cut: the original-graph edges crossing between the reachable
/// side and the unreachable side of a residual-graph reachability
/// search, in either orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cut {
    /// Nodes reachable from the source in the residual graph.
    pub reachable: Vec<NodeId>,
    /// Edges of the original graph with exactly one endpoint reachable:
    /// `from` reachable and `to` not, or `to` reachable and `from` not.
    pub crossing_edges: Vec<crate::graph::EdgeId>,
}

/// Build the residual capacity of every edge given a flow: `c(e) - f(e)`
/// forward, `f(e)` backward.
fn residual_adjacency(g: &CapacityGraph, flow: &[f64], epsilon: f64) -> Vec<Vec<usize>> {
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); g.num_nodes()];
    for (e, from, to, capacity) in g.edges() {
        let f = flow[e.0];
        if capacity - f > epsilon {
            adj[from.0].push(to.0);
        }
        if f > epsilon {
            adj[to.0].push(from.0);
        }
    }
    adj
}

/// The set of nodes reachable from `source` via edges with residual
/// capacity greater than `epsilon`, and the original-graph edges
/// crossing between that set and its complement, in either orientation.
/// Mirrors `cut_from_residuals` / `approx_min_cut_from_residuals`, which
/// collects both `u in visited and v not in visited` and `v in visited
/// and u not in visited` edges, using an explicit stack instead of the
/// original's unbounded recursion.
pub fn cut_from_residuals(g: &CapacityGraph, flow: &[f64], source: NodeId, epsilon: f64) -> Cut {
    let adj = residual_adjacency(g, flow, epsilon);
    let mut visited = vec![false; g.num_nodes()];
    let mut stack = vec![source.0];
    visited[source.0] = true;
    while let Some(node) = stack.pop() {
        for &next in &adj[node] {
            if !visited[next] {
                visited[next] = true;
                stack.push(next);
            }
        }
    }

    let reachable: Vec<NodeId> = (0..g.num_nodes()).filter(|&n| visited[n]).map(NodeId).collect();
    let crossing_edges = g
        .edges()
        .filter(|&(_, from, to, _)| visited[from.0] != visited[to.0])
        .map(|(e, ..)| e)
        .collect();

    Cut { reachable, crossing_edges }
}

/// The exact min-cut separating `source` from the rest, given a max
/// flow's residuals (`epsilon = 0`). Mirrors `min_cut_from_residuals`.
pub fn min_cut_from_residuals(g: &CapacityGraph, flow: &[f64], source: NodeId) -> Cut {
    cut_from_residuals(g, flow, source, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturated_bottleneck_edge_determines_the_cut() {
        // 0 --5--> 1 --2--> 2 --5--> 3, bottleneck is edge (1,2) with cap 2.
        let mut g = CapacityGraph::new(4);
        g.add_edge(0, 1, 5.0).unwrap();
        let bottleneck = g.add_edge(1, 2, 2.0).unwrap().unwrap();
        g.add_edge(2, 3, 5.0).unwrap();

        let flow = vec![2.0, 2.0, 2.0];
        let cut = min_cut_from_residuals(&g, &flow, NodeId(0));
        assert_eq!(cut.reachable, vec![NodeId(0), NodeId(1)]);
        assert_eq!(cut.crossing_edges, vec![bottleneck]);
    }

    #[test]
    fn crossing_edges_include_both_orientations() {
        // 0 --5--> 1, and 2 --1--> 0 (a directed edge entering the
        // reachable set from the unreachable side). Only node 0 is
        // reachable once (0,1) is saturated; the (2,0) edge must still
        // show up in crossing_edges even though it points *into* S.
        let mut g = CapacityGraph::new(3);
        let forward = g.add_edge(0, 1, 5.0).unwrap().unwrap();
        let into_s = g.add_edge(2, 0, 3.0).unwrap().unwrap();

        let flow = vec![5.0, 0.0];
        let cut = min_cut_from_residuals(&g, &flow, NodeId(0));
        assert_eq!(cut.reachable, vec![NodeId(0)]);
        assert_eq!(cut.crossing_edges.len(), 2);
        assert!(cut.crossing_edges.contains(&forward));
        assert!(cut.crossing_edges.contains(&into_s));
    }

    #[test]
    fn unreachable_sink_yields_empty_crossing_when_fully_saturated() {
        let mut g = CapacityGraph::new(2);
        g.add_edge(0, 1, 3.0).unwrap();
        let flow = vec![3.0];
        let cut = min_cut_from_residuals(&g, &flow, NodeId(0));
        assert_eq!(cut.reachable, vec![NodeId(0)]);
        assert_eq!(cut.crossing_edges.len(), 1);
    }
}
