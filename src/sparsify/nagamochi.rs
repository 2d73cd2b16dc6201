//! Nagamochi-Ibaraki FOREST and CAPFOREST: linear-time edge-connectivity
//! certificates for (capacitated) multigraphs.
//!
//! "Computing Edge-Connectivity in Multigraphs and Capacitated Graphs",
//! Hiroshi Nagamochi, Toshihide Ibaraki, 1992. Grounded on
//! `examples/original_source/src/sparsification.py`'s `nagamochi_forest`,
//! `nagamochi_capforest`, `certificate`, `weighted_certificate`,
//! `weak_edges` and `partition`, using [`crate::heap::FibonacciHeap`] for
//! the scan-order priority queue both routines need.

use super::multigraph::Multigraph;
use crate::heap::{FibonacciHeap, Handle};
use std::collections::{BTreeMap, HashSet};

/// Partition the (unit-weight) edges of `g` into connectivity classes
/// `E_1, E_2, ...` such that `(V, E_1 ∪ .. ∪ E_k)` is `k`-edge-connected,
/// keyed by class index.
pub fn nagamochi_forest(g: &Multigraph) -> BTreeMap<usize, Vec<usize>> {
    let n = g.num_nodes();
    let mut unscanned: HashSet<(usize, usize, usize)> = HashSet::new();
    for node in 0..n {
        for &(edge_id, other) in g.adjacent(node) {
            unscanned.insert((node, other, edge_id));
        }
    }

    let mut r = vec![0i64; n];
    let mut heap: FibonacciHeap<usize> = FibonacciHeap::new();
    let mut handle: Vec<Option<Handle>> = (0..n).map(|v| Some(heap.insert(v, 0.0))).collect();

    let mut partitions: BTreeMap<usize, Vec<usize>> = BTreeMap::new();

    while !heap.is_empty() {
        let x = heap.extract_min().expect("non-empty heap");
        handle[x] = None;
        let incident: Vec<(usize, usize)> = g.adjacent(x).to_vec();
        for (edge_id, y) in incident {
            let triple = (x, y, edge_id);
            if !unscanned.remove(&triple) {
                continue;
            }
            unscanned.remove(&(y, x, edge_id));

            let k = (r[y] + 1) as usize;
            partitions.entry(k).or_default().push(edge_id);

            if r[x] == r[y] {
                r[x] += 1;
            }
            r[y] += 1;
            if let Some(h) = handle[y] {
                heap.decrease_key(h, -(r[y] as f64));
            }
        }
    }
    partitions
}

/// The capacitated analogue of [`nagamochi_forest`]: each edge is tagged
/// with a real-valued `q` such that thresholding `q <= k` yields a
/// `k`-edge-connectivity certificate, matching `nagamochi_capforest`.
pub fn nagamochi_capforest(g: &Multigraph) -> BTreeMap<usize, f64> {
    let n = g.num_nodes();
    let mut unscanned: HashSet<(usize, usize, usize)> = HashSet::new();
    for node in 0..n {
        for &(edge_id, other) in g.adjacent(node) {
            unscanned.insert((node, other, edge_id));
        }
    }

    let mut r = vec![0.0f64; n];
    let mut heap: FibonacciHeap<usize> = FibonacciHeap::new();
    let handle: Vec<Handle> = (0..n).map(|v| heap.insert(v, 0.0)).collect();

    let mut q: BTreeMap<usize, f64> = BTreeMap::new();

    while !heap.is_empty() {
        let x = heap.extract_min().expect("non-empty heap");
        let incident: Vec<(usize, usize)> = g.adjacent(x).to_vec();
        for (edge_id, y) in incident {
            let triple = (x, y, edge_id);
            if !unscanned.remove(&triple) {
                continue;
            }
            unscanned.remove(&(y, x, edge_id));

            let c = g.edge_capacity(edge_id);
            let new_r_y = r[y] + c;
            q.insert(edge_id, new_r_y);
            r[y] = new_r_y;
            heap.decrease_key(handle[y], -new_r_y);
        }
    }
    q
}

/// Edge ids whose unit-weight connectivity class is `<= k`.
pub fn certificate(g: &Multigraph, k: usize) -> HashSet<usize> {
    nagamochi_forest(g)
        .into_iter()
        .filter(|&(class, _)| class <= k)
        .flat_map(|(_, edges)| edges)
        .collect()
}

/// Edge ids whose capacitated connectivity value is `<= k`.
pub fn weighted_certificate(g: &Multigraph, k: f64) -> HashSet<usize> {
    nagamochi_capforest(g)
        .into_iter()
        .filter(|&(_, val)| val <= k)
        .map(|(edge_id, _)| edge_id)
        .collect()
}

/// `log2(n)` rounds of certificate extraction, each round stripping a
/// `2k`-certificate from the remaining graph, matching `weak_edges`. The
/// returned ids are edge ids of `g` itself.
pub fn weak_edges(g: &Multigraph, k: f64) -> HashSet<usize> {
    let mut current = g.clone();
    current.retag_source_edges(); // source_edge now tracks back to `g`
    let mut out: HashSet<usize> = HashSet::new();
    let rounds = ((current.num_nodes().max(2) as f64).log2() + 0.5) as usize;
    for _ in 0..rounds {
        // `cert` holds ids local to `current`, not to `g` -- partition
        // retags its own working copy independently.
        let cert = partition(&current, 2.0 * k);
        out.extend(cert.iter().map(|&id| current.source_edge(id)));
        let keep: Vec<usize> = (0..current.num_edges())
            .filter(|id| !cert.contains(id))
            .collect();
        // `with_edge_subset` carries `source_edge` through unchanged, so
        // `current` keeps tracking back to `g` across rounds.
        current = current.with_edge_subset(&keep);
    }
    out
}

/// Iteratively contract away everything outside a `k`-certificate until
/// the multigraph is sparse enough (`<= 2k(n-1)` edges), returning the
/// edge ids of `g` (via [`Multigraph::source_edge`]) that survive,
/// possibly after intermediate contraction. Mirrors `partition`.
pub fn partition(g: &Multigraph, k: f64) -> HashSet<usize> {
    let mut current = g.clone();
    current.retag_source_edges();
    while (current.num_edges() as f64) > 2.0 * k * (current.num_nodes().saturating_sub(1) as f64) {
        let cert = weighted_certificate(&current, k);
        let contract_edges: Vec<usize> = (0..current.num_edges())
            .filter(|id| !cert.contains(id))
            .collect();
        if contract_edges.is_empty() {
            break;
        }
        current = current.contract(&contract_edges);
    }
    (0..current.num_edges()).map(|id| current.source_edge(id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CapacityGraph;

    fn triangle() -> Multigraph {
        let mut g = CapacityGraph::new(3);
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(1, 2, 1.0).unwrap();
        g.add_edge(0, 2, 1.0).unwrap();
        Multigraph::from_capacity_graph(&g)
    }

    #[test]
    fn forest_partitions_all_edges() {
        let mg = triangle();
        let forest = nagamochi_forest(&mg);
        let total: usize = forest.values().map(|v| v.len()).sum();
        assert_eq!(total, mg.num_edges());
    }

    #[test]
    fn capforest_assigns_every_edge_a_value() {
        let mg = triangle();
        let q = nagamochi_capforest(&mg);
        assert_eq!(q.len(), mg.num_edges());
    }

    #[test]
    fn certificate_of_large_k_is_everything() {
        let mg = triangle();
        let cert = certificate(&mg, 1_000_000);
        assert_eq!(cert.len(), mg.num_edges());
    }
}
