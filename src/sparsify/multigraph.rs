//! A small undirected multigraph used internally by the sparsifier.
//!
//! `Multigraph` differs from [`crate::graph::CapacityGraph`] in two ways
//! that the Nagamochi-Ibaraki routines need: it is undirected (each edge
//! appears in both endpoints' adjacency) and it allows parallel edges
//! between the same pair of nodes, produced by repeated contraction.
//!
//! Grounded on `examples/original_source/src/graph_util.py`'s
//! `multigraph_contract_edges` and on the `nx.MultiGraph` usage
//! throughout `sparsification.py`.

use crate::graph::CapacityGraph;
use petgraph::unionfind::UnionFind;
use std::collections::HashMap;

/// One (undirected) edge of a [`Multigraph`].
#[derive(Debug, Clone, Copy)]
pub struct MgEdge {
    pub u: usize,
    pub v: usize,
    pub capacity: f64,
    /// The original-graph node pair this edge traces back to. Set once
    /// at construction from a [`CapacityGraph`] and never reassigned
    /// (`origin` in the source material's top-level bookkeeping).
    pub origin: (usize, usize),
    /// The edge id this edge had in whatever [`Multigraph`] a
    /// `partition`/`weak_edges` call most recently retagged from.
    /// Preserved across [`Multigraph::contract`] (an edge is relabeled or
    /// dropped by contraction, never split or merged), so callers can
    /// translate a contracted edge back to an id in their own input
    /// graph.
    pub source_edge: usize,
}

/// An undirected, capacitated multigraph over nodes `0..num_nodes`.
#[derive(Debug, Clone)]
pub struct Multigraph {
    num_nodes: usize,
    edges: Vec<MgEdge>,
    /// Per node: `(edge_id, other_endpoint)` for every incident edge.
    adjacency: Vec<Vec<(usize, usize)>>,
}

impl Multigraph {
    /// An empty multigraph over `num_nodes` isolated nodes.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            edges: Vec::new(),
            adjacency: vec![Vec::new(); num_nodes],
        }
    }

    /// Build the symmetrized multigraph of a [`CapacityGraph`]: one
    /// undirected edge per directed arc, `origin` set to its `(from, to)`
    /// pair.
    pub fn from_capacity_graph(g: &CapacityGraph) -> Self {
        let mut mg = Self::new(g.num_nodes());
        for (_, from, to, capacity) in g.edges() {
            mg.push_edge(from.0, to.0, capacity, (from.0, to.0), 0);
        }
        mg.retag_source_edges();
        mg
    }

    fn push_edge(&mut self, u: usize, v: usize, capacity: f64, origin: (usize, usize), source_edge: usize) -> usize {
        let id = self.edges.len();
        self.edges.push(MgEdge { u, v, capacity, origin, source_edge });
        self.adjacency[u].push((id, v));
        if u != v {
            self.adjacency[v].push((id, u));
        }
        id
    }

    /// Reset every edge's `source_edge` to its own id, so that it now
    /// identifies edges relative to *this* graph. Call this once at the
    /// start of a `partition`/`weak_edges` pass, mirroring the source
    /// material tagging `original_edge` at the top of `partition`.
    pub fn retag_source_edges(&mut self) {
        for (id, e) in self.edges.iter_mut().enumerate() {
            e.source_edge = id;
        }
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of edges (each parallel edge counted separately).
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// All edges, by id.
    pub fn edges(&self) -> &[MgEdge] {
        &self.edges
    }

    /// Incident `(edge_id, other_endpoint)` pairs for `node`.
    pub fn adjacent(&self, node: usize) -> &[(usize, usize)] {
        &self.adjacency[node]
    }

    /// Capacity of `edge_id`.
    pub fn edge_capacity(&self, edge_id: usize) -> f64 {
        self.edges[edge_id].capacity
    }

    /// The original-graph endpoints of `edge_id`.
    pub fn edge_origin(&self, edge_id: usize) -> (usize, usize) {
        self.edges[edge_id].origin
    }

    /// The id `edge_id` had in the graph this one was last retagged or
    /// contracted from.
    pub fn source_edge(&self, edge_id: usize) -> usize {
        self.edges[edge_id].source_edge
    }

    /// Rebuild a multigraph from a filtered subset of this one's edges,
    /// keeping the same node set. Equivalent to `h.subgraph(comp)` in the
    /// source material when the kept edges are exactly those touching
    /// `comp` (isolated nodes are harmless; callers skip components of
    /// size `<= 1`).
    pub fn with_edge_subset(&self, keep: &[usize]) -> Self {
        let mut mg = Self::new(self.num_nodes);
        for &id in keep {
            let e = self.edges[id];
            mg.push_edge(e.u, e.v, e.capacity, e.origin, e.source_edge);
        }
        mg
    }

    /// Connected components over the current edge set, as lists of node
    /// indices. Isolated nodes form singleton components.
    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        let mut uf = UnionFind::new(self.num_nodes);
        for e in &self.edges {
            uf.union(e.u, e.v);
        }
        let mut groups: HashMap<usize, Vec<usize>> = HashMap::new();
        for node in 0..self.num_nodes {
            groups.entry(uf.find(node)).or_default().push(node);
        }
        groups.into_values().collect()
    }

    /// Contract each connected component of `(V, contract_edges)` into a
    /// single node, dropping self-loops created by the contraction but
    /// keeping every other edge (with multiplicity), relabeled onto the
    /// new, compacted node set. Mirrors
    /// `graph_util.multigraph_contract_edges`.
    pub fn contract(&self, contract_edges: &[usize]) -> Self {
        let mut uf = UnionFind::new(self.num_nodes);
        for &id in contract_edges {
            let e = self.edges[id];
            uf.union(e.u, e.v);
        }

        let mut new_id: HashMap<usize, usize> = HashMap::new();
        for node in 0..self.num_nodes {
            let root = uf.find(node);
            let next = new_id.len();
            new_id.entry(root).or_insert(next);
        }
        let contracted: std::collections::HashSet<usize> = contract_edges.iter().copied().collect();

        let mut out = Self::new(new_id.len());
        for (id, e) in self.edges.iter().enumerate() {
            if contracted.contains(&id) {
                continue;
            }
            let nu = new_id[&uf.find(e.u)];
            let nv = new_id[&uf.find(e.v)];
            if nu == nv {
                continue;
            }
            out.push_edge(nu, nv, e.capacity, e.origin, e.source_edge);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_capacity_graph_is_undirected() {
        let mut g = CapacityGraph::new(3);
        g.add_edge(0, 1, 2.0).unwrap();
        g.add_edge(1, 2, 3.0).unwrap();
        let mg = Multigraph::from_capacity_graph(&g);
        assert_eq!(mg.num_edges(), 2);
        assert_eq!(mg.adjacent(0).len(), 1);
        assert_eq!(mg.adjacent(1).len(), 2);
        assert_eq!(mg.adjacent(2).len(), 1);
    }

    #[test]
    fn contract_merges_endpoints_and_drops_self_loops() {
        let mut g = CapacityGraph::new(4);
        let e01 = g.add_edge(0, 1, 1.0).unwrap().unwrap();
        g.add_edge(1, 2, 1.0).unwrap();
        g.add_edge(0, 2, 1.0).unwrap(); // becomes a self-loop on {0,1} U {2}? no - only contracting e01
        g.add_edge(2, 3, 1.0).unwrap();
        let mg = Multigraph::from_capacity_graph(&g);

        let contracted = mg.contract(&[e01.0]);
        // {0,1} merge into one node; edges (1,2) and (0,2) both now go to
        // the same new node pair (merged,2) - kept, not a self-loop.
        assert_eq!(contracted.num_nodes(), 3);
        assert_eq!(contracted.num_edges(), 3);
    }

    #[test]
    fn connected_components_counts_isolated_nodes() {
        let mg = Multigraph::new(3);
        let comps = mg.connected_components();
        assert_eq!(comps.len(), 3);
    }
}
