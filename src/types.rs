//! Common types used across the solver, approximators, and sparsifier.

use serde::{Deserialize, Serialize};

/// Edge/path capacity. Flows here are real-valued, unlike integral
/// max-flow formulations.
pub type Capacity = f64;

/// A signed per-node demand (sinks positive, sources negative).
pub type Demand = f64;

/// Solver status after a call to the Sherman solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverStatus {
    /// The solver ran to completion within its step budget.
    Converged,
    /// The solver exhausted `ShermanParams::max_outer_iterations` without
    /// driving the residual demand to zero. The returned flow is still a
    /// valid (if less precise) routing.
    IterationLimit,
}

impl SolverStatus {
    /// Returns true if the solver completed within its step budget.
    pub fn converged(self) -> bool {
        matches!(self, Self::Converged)
    }
}

/// Statistics from a solver run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolverStats {
    /// Time spent solving (seconds).
    pub solve_time_seconds: f64,
    /// Total outer-loop (boosting) iterations.
    pub outer_iterations: usize,
    /// Total inner-loop (gradient step) iterations across all outer
    /// iterations.
    pub inner_iterations: usize,
}

/// Parameters controlling the Sherman solver's step budget and the
/// sparsifier's PRNG.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShermanParams {
    /// Maximum outer (boosting) iterations before giving up and returning
    /// `SolverStatus::IterationLimit`. `0` means unlimited (bounded only
    /// by the `floor(ln(2m))` schedule spec.md's boosting loop uses).
    pub max_outer_iterations: usize,
    /// Maximum inner (gradient-step) iterations per `almost_route` call
    /// before giving up. `0` means unlimited.
    pub max_inner_iterations: usize,
    /// Seed for the sparsifier's PRNG, so sampling is reproducible.
    pub random_seed: u64,
}

impl Default for ShermanParams {
    fn default() -> Self {
        Self {
            max_outer_iterations: 0,
            max_inner_iterations: 1_000_000,
            random_seed: 0,
        }
    }
}

impl ShermanParams {
    /// Create params with a fixed outer-iteration budget.
    pub fn with_outer_iteration_limit(limit: usize) -> Self {
        Self {
            max_outer_iterations: limit,
            ..Default::default()
        }
    }

    /// Create params with a given PRNG seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            random_seed: seed,
            ..Default::default()
        }
    }

    /// Whether an outer-iteration limit is set.
    pub fn has_outer_iteration_limit(&self) -> bool {
        self.max_outer_iterations > 0
    }
}
