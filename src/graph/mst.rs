//! Maximum-capacity spanning tree construction.
//!
//! The "maximum spanning tree" used as the tree congestion approximator's
//! routing backbone is the spanning tree of maximum total capacity of the
//! underlying undirected graph. Per spec: invert capacities (`c -> 1/c`),
//! run a minimum-spanning-tree algorithm on the inverted weights, then
//! invert back. Kruskal with a union-find over inverted weights and
//! Kruskal with a union-find sorted by descending original capacity pick
//! identical edges (inversion is monotone-decreasing), so the
//! implementation below sorts descending by capacity directly and keeps
//! the original (uninverted) capacities on the resulting tree edges --
//! equivalent to inverting, running Kruskal, and inverting back, without
//! the intermediate round-trip.
//!
//! Grounded on the Kruskal-with-union-find structure in
//! `TianyiShi2001-Algorithms/src/algo/graph/minimum_spanning_tree/kruskal.rs`;
//! the union-find itself is `petgraph::unionfind::UnionFind`, already on
//! the dependency tree via `petgraph`.

use crate::graph::{CapacityGraph, NodeId};
use crate::{Capacity, Error, Result};
use ordered_float::OrderedFloat;
use petgraph::unionfind::UnionFind;

/// A spanning tree rooted at `root`, with edges cached in forward DFS
/// order as `(parent, child, capacity)` triples. Every non-root node
/// appears exactly once as a child (spec.md §3 invariant).
#[derive(Debug, Clone)]
pub struct SpanningTree {
    pub(crate) root: NodeId,
    pub(crate) dfs_edges: Vec<(NodeId, NodeId, Capacity)>,
}

impl SpanningTree {
    /// The tree's root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Edges in forward DFS order (parent before child), as
    /// `(parent, child, capacity)`.
    pub fn dfs_edges(&self) -> &[(NodeId, NodeId, Capacity)] {
        &self.dfs_edges
    }
}

/// Build the maximum-capacity spanning tree of `g`'s undirected view,
/// rooted at node `0`.
///
/// Returns `Error::InvalidInput` if the graph is not connected (a
/// spanning tree over all `n` nodes does not exist).
pub fn maximum_spanning_tree(g: &CapacityGraph) -> Result<SpanningTree> {
    let n = g.num_nodes();
    if n == 0 {
        return Err(Error::invalid_input("cannot build a spanning tree of an empty graph"));
    }

    let mut candidates: Vec<(NodeId, NodeId, Capacity)> =
        g.edges().map(|(_, u, v, c)| (u, v, c)).collect();
    // Descending by capacity == ascending by inverted capacity.
    candidates.sort_by_key(|&(_, _, c)| std::cmp::Reverse(OrderedFloat(c)));

    let mut uf = UnionFind::<usize>::new(n);
    let mut tree_adj: Vec<Vec<(NodeId, Capacity)>> = vec![Vec::new(); n];
    let mut tree_edge_count = 0;

    for (u, v, c) in candidates {
        if uf.union(u.0, v.0) {
            tree_adj[u.0].push((v, c));
            tree_adj[v.0].push((u, c));
            tree_edge_count += 1;
        }
    }

    if tree_edge_count != n - 1 {
        return Err(Error::invalid_input(
            "graph is not connected; no spanning tree covers all nodes",
        ));
    }

    let root = NodeId(0);
    let dfs_edges = iterative_dfs_edges(&tree_adj, root, n);
    Ok(SpanningTree { root, dfs_edges })
}

/// Explicit-stack DFS over the tree adjacency, yielding `(parent, child,
/// capacity)` triples in the order a recursive child-ward DFS would
/// (neighbors visited in adjacency-insertion order), per spec.md §9's
/// "convert to explicit stacks" guidance for O(n)-deep recursion.
fn iterative_dfs_edges(
    tree_adj: &[Vec<(NodeId, Capacity)>],
    root: NodeId,
    n: usize,
) -> Vec<(NodeId, NodeId, Capacity)> {
    let mut visited = vec![false; n];
    visited[root.0] = true;
    let mut edges = Vec::with_capacity(n.saturating_sub(1));

    // Each stack frame is (node, next neighbor index to try).
    let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];

    while let Some(&mut (node, ref mut idx)) = stack.last_mut() {
        let neighbors = &tree_adj[node.0];
        if *idx >= neighbors.len() {
            stack.pop();
            continue;
        }
        let (neighbor, cap) = neighbors[*idx];
        *idx += 1;
        if visited[neighbor.0] {
            continue;
        }
        visited[neighbor.0] = true;
        edges.push((node, neighbor, cap));
        stack.push((neighbor, 0));
    }

    edges
}
