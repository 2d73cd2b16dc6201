//! Congestion approximators
//!
//! A congestion approximator models (abstractly) a linear operator `R`
//! on node-space such that
//!
//! ```text
//! ‖Rb‖_∞ ≤ opt(b) ≤ α · ‖Rb‖_∞
//! ```
//!
//! where `opt(b)` is the minimum achievable max-edge congestion routing
//! demand vector `b`. [`CongestionApprox`] is the capability-set trait
//! (compute `R·`, `Rᵀ·`, and the scalar bound `α`) the Sherman solver is
//! generic over; [`conductance::ConductanceApprox`] and
//! [`tree::TreeApprox`] are the two concrete implementations.
//!
//! Grounded on the teacher's trait-per-capability convention
//! (`AssignmentSolver` in the teacher's `src/assignment/mod.rs`) and on
//! `examples/original_source/src/congestion_approx.py`.

pub mod conductance;
pub mod tree;

pub use conductance::ConductanceApprox;
pub use tree::TreeApprox;

/// A linear operator `R` bounding the minimum achievable congestion of a
/// demand vector within a factor `α`.
pub trait CongestionApprox {
    /// Compute `R · b` for a node-space demand vector `b`.
    fn compute_dot(&self, b: &[f64]) -> Vec<f64>;

    /// Compute `Rᵀ · x` for a vector `x` in the same edge-like space
    /// `compute_dot` produces.
    fn compute_transpose_dot(&self, x: &[f64]) -> Vec<f64>;

    /// The error term `α` bounding `opt(b) ≤ α · ‖Rb‖_∞`.
    fn alpha(&self) -> f64;
}
