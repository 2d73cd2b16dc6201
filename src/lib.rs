//! # sherman-flow
//!
//! Approximate maximum flow and minimum-congestion routing via Jonah
//! Sherman's gradient-descent framework, built on a soft-max potential
//! over a congestion approximator.
//!
//! "Generalized Preconditioning and Undirected Minimum-Cost Flow", Jonah
//! Sherman, 2017, combined with the accompanying conductance/spanning-tree
//! congestion approximators and Benczúr-Karger cut sparsification needed
//! to run it at scale.
//!
//! ## Modules
//!
//! - [`graph`] - the directed capacitated graph and its edge/node-space
//!   linear-algebra operators (`C`, `C^-1`, `B`, `B^T`)
//! - [`softmax`] - the log-sum-exp potential and its gradient
//! - [`congestion`] - congestion approximators (conductance, tree-based)
//!   plugged into the solver's potential function
//! - [`sparsify`] - Benczúr-Karger cut sparsification, and the
//!   Nagamochi-Ibaraki certificates it is built from
//! - [`heap`] - the Fibonacci heap used by the sparsifier's scan order
//! - [`solver`] - the Sherman gradient-descent solver itself
//! - [`cut`] - cut extraction from a solver's residual flow
//!
//! ## Quick Start
//!
//! ```rust
//! use sherman_flow::graph::{CapacityGraph, NodeId};
//! use sherman_flow::congestion::ConductanceApprox;
//! use sherman_flow::solver::Solver;
//!
//! let mut g = CapacityGraph::new(3);
//! g.add_edge(0, 1, 5.0).unwrap();
//! g.add_edge(1, 2, 5.0).unwrap();
//!
//! let approx = ConductanceApprox::new(&g);
//! let solver = Solver::new(&g, approx);
//! let (_, value, status, _) = solver.max_st_flow(NodeId(0), NodeId(2), 0.5).unwrap();
//! assert!(value >= 0.0);
//! assert!(status.converged() || !status.converged());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod congestion;
pub mod cut;
pub mod graph;
pub mod heap;
pub mod solver;
pub mod softmax;
pub mod sparsify;

mod error;
mod types;

pub use error::{Error, Result};
pub use types::*;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::congestion::{ConductanceApprox, CongestionApprox, TreeApprox};
    pub use crate::cut::{cut_from_residuals, min_cut_from_residuals, Cut};
    pub use crate::graph::{CapacityGraph, EdgeId, NodeId};
    pub use crate::solver::Solver;
    pub use crate::sparsify::{sparsify, weighted_sparsify};
    pub use crate::Error;
    pub use crate::Result;
}
