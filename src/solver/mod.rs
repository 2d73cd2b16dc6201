//! Sherman's gradient-descent framework for approximate minimum-congestion
//! routing and maximum flow.
//!
//! Grounded on `examples/original_source/src/sherman.py`'s `ShermanFlow`
//! class: [`Solver::almost_route`] is `almost_route` (the inner
//! accelerated-gradient loop over the two-sided soft-max potential
//! `phi`), [`Solver::min_congestion_flow`] is the outer boosting loop,
//! and [`Solver::max_flow`]/[`Solver::max_st_flow`] are its public
//! wrappers. The potential and its gradient reuse [`crate::softmax`];
//! the congestion term reuses any [`crate::congestion::CongestionApprox`]
//! implementation; edge/node-space linear algebra reuses
//! [`crate::graph::CapacityGraph`]'s `C`/`C^-1`/`B`/`B^T` operators.

use crate::congestion::CongestionApprox;
use crate::graph::{CapacityGraph, NodeId};
use crate::softmax::{grad_lse, lse};
use crate::types::{ShermanParams, SolverStats, SolverStatus};
use crate::{Error, Result};

/// `numpy.sign`, which maps `0.0 -> 0.0` (unlike [`f64::signum`], which
/// never returns zero). `almost_route`'s step direction needs this exact
/// behavior: an exactly-zero gradient component contributes no step.
fn np_sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// A Sherman-framework solver bound to one graph and one congestion
/// approximator.
pub struct Solver<'g, C: CongestionApprox> {
    graph: &'g CapacityGraph,
    cong_approx: C,
    params: ShermanParams,
}

impl<'g, C: CongestionApprox> Solver<'g, C> {
    /// Build a solver with default [`ShermanParams`].
    pub fn new(graph: &'g CapacityGraph, cong_approx: C) -> Self {
        Self { graph, cong_approx, params: ShermanParams::default() }
    }

    /// Override the solver's iteration-budget and seed parameters.
    pub fn with_params(mut self, params: ShermanParams) -> Self {
        self.params = params;
        self
    }

    fn validate_demands(&self, demands: &[f64]) -> Result<()> {
        let n = self.graph.num_nodes();
        if demands.len() != n {
            return Err(Error::dimension_mismatch(n, demands.len()));
        }
        Ok(())
    }

    fn validate_epsilon(&self, epsilon: f64) -> Result<()> {
        if !(epsilon > 0.0) || !epsilon.is_finite() {
            return Err(Error::invalid_input(format!("epsilon must be positive and finite, got {epsilon}")));
        }
        Ok(())
    }

    /// The two-sided soft-max potential `phi(f, b) = lse(C^-1 f) +
    /// lse(2 alpha R(b - Bf))`.
    fn phi(&self, f: &[f64], b: &[f64]) -> f64 {
        let alpha = self.cong_approx.alpha();
        let bf = self.graph.incidence_apply(f);
        let resid: Vec<f64> = b.iter().zip(&bf).map(|(bi, bfi)| bi - bfi).collect();
        let r_resid = self.cong_approx.compute_dot(&resid);
        let scaled: Vec<f64> = r_resid.iter().map(|x| 2.0 * alpha * x).collect();
        let cinv_f = self.graph.scale_by_inverse_capacity(f);
        lse(&cinv_f) + lse(&scaled)
    }

    /// The gradient of [`Solver::phi`] with respect to `f`.
    fn grad_phi(&self, f: &[f64], b: &[f64]) -> Vec<f64> {
        let alpha = self.cong_approx.alpha();

        let x1 = self.graph.scale_by_inverse_capacity(f);
        let p1 = grad_lse(&x1);

        let bf = self.graph.incidence_apply(f);
        let resid: Vec<f64> = b.iter().zip(&bf).map(|(bi, bfi)| bi - bfi).collect();
        let x2: Vec<f64> = self
            .cong_approx
            .compute_dot(&resid)
            .iter()
            .map(|x| 2.0 * alpha * x)
            .collect();
        let p2 = grad_lse(&x2);

        let cinv_p1 = self.graph.scale_by_inverse_capacity(&p1);
        let rt_p2 = self.cong_approx.compute_transpose_dot(&p2);
        let bt_rt_p2 = self.graph.incidence_transpose_apply(&rt_p2);

        cinv_p1.iter().zip(&bt_rt_p2).map(|(a, b)| a - 2.0 * alpha * b).collect()
    }

    /// Route `demands` to within `epsilon` max-edge congestion of
    /// optimal, via accelerated gradient descent on [`Solver::phi`].
    /// Mirrors `almost_route`.
    pub fn almost_route(&self, demands: &[f64], epsilon: f64) -> Result<(Vec<f64>, SolverStats)> {
        self.validate_demands(demands)?;
        self.validate_epsilon(epsilon)?;

        let n = self.graph.num_nodes();
        let m = self.graph.num_edges();

        // These constants come from (loose) bounds in the Sherman
        // correctness proof; they have an outsized effect on practical
        // convergence speed.
        let k1 = 3.5 / epsilon;
        let k2 = 2.0 / 7.0;

        let mut scaling = 1.0;
        let mut f = vec![0.0; m];
        let mut y = f.clone();
        let mut b: Vec<f64> = demands.to_vec();

        let norm_rb = self
            .cong_approx
            .compute_dot(&b)
            .iter()
            .fold(0.0_f64, |acc, x| acc.max(x.abs()));
        let alpha = self.cong_approx.alpha();
        if norm_rb == 0.0 {
            return Ok((f, SolverStats::default()));
        }
        scaling *= (k1 * (n as f64).ln() / (2.0 * alpha * norm_rb)).abs();
        b.iter_mut().for_each(|bi| *bi *= scaling);

        let mut iters = 1usize;
        let mut inner_iterations = 0usize;
        let budget = self.params.max_inner_iterations;

        loop {
            while self.phi(&f, &b) < k1 * (n as f64).ln() {
                inner_iterations += 1;
                if budget > 0 && inner_iterations >= budget {
                    tracing::warn!(inner_iterations, "almost_route hit its iteration budget while rescaling");
                    return Err(Error::NoConvergence { iterations: inner_iterations });
                }
                tracing::debug!(inner_iterations, scaling, "almost_route rescaling b, f, y");
                let ratio = (k1 + 1.0) / k1;
                f.iter_mut().for_each(|v| *v *= ratio);
                y.iter_mut().for_each(|v| *v *= ratio);
                b.iter_mut().for_each(|v| *v *= ratio);
                scaling *= ratio;
            }

            let grad_phi_y = self.grad_phi(&y, &b);
            let c_grad = self.graph.scale_by_capacity(&grad_phi_y);
            let delta: f64 = c_grad.iter().map(|v| v.abs()).sum();

            if delta >= k2 * epsilon {
                inner_iterations += 1;
                if budget > 0 && inner_iterations >= budget {
                    tracing::warn!(inner_iterations, delta, "almost_route hit its iteration budget mid-step");
                    return Err(Error::NoConvergence { iterations: inner_iterations });
                }
                let f_prev = f.clone();
                let sign_grad: Vec<f64> = grad_phi_y.iter().map(|&v| np_sign(v)).collect();
                let c_sign = self.graph.scale_by_capacity(&sign_grad);
                let step = delta / (1.0 + 4.0 * alpha * alpha);
                f = y.iter().zip(&c_sign).map(|(yi, ci)| yi - step * ci).collect();
                let momentum = (iters as f64 - 1.0) / (iters as f64 + 2.0);
                y = f.iter().zip(&f_prev).map(|(fi, fpi)| fi + momentum * (fi - fpi)).collect();
                iters += 1;
            } else {
                let result: Vec<f64> = f.iter().map(|v| v / scaling).collect();
                return Ok((result, SolverStats { outer_iterations: 1, inner_iterations, solve_time_seconds: 0.0 }));
            }
        }
    }

    /// Boost [`Solver::almost_route`]'s one-shot approximation into a
    /// tighter minimum-congestion flow by repeatedly routing the
    /// residual demand. Mirrors `min_congestion_flow`.
    ///
    /// [`SolverStatus::IterationLimit`] is reported when
    /// `ShermanParams::max_outer_iterations` cut the boosting loop short
    /// of the `floor(ln(2m))` schedule the algorithm otherwise runs; the
    /// returned flow is still valid, just less precise.
    pub fn min_congestion_flow(&self, demands: &[f64], epsilon: f64) -> Result<(Vec<f64>, SolverStatus, SolverStats)> {
        self.validate_demands(demands)?;
        self.validate_epsilon(epsilon)?;

        let m = self.graph.num_edges();
        let mut f_total = vec![0.0; m];
        let mut demands = demands.to_vec();
        let mut epsilon = epsilon;

        let planned = (2.0 * (m.max(1) as f64)).ln().max(0.0).floor() as usize;
        let total_outer = if self.params.has_outer_iteration_limit() {
            planned.min(self.params.max_outer_iterations)
        } else {
            planned
        };
        let status = if self.params.has_outer_iteration_limit() && total_outer < planned {
            SolverStatus::IterationLimit
        } else {
            SolverStatus::Converged
        };
        if status == SolverStatus::IterationLimit {
            tracing::warn!(planned, total_outer, "min_congestion_flow capped below its planned round count");
        }

        let mut inner_total = 0usize;
        for round in 0..total_outer {
            let (f, stats) = self.almost_route(&demands, epsilon)?;
            let bf = self.graph.incidence_apply(&f);
            demands = demands.iter().zip(&bf).map(|(d, bfi)| d - bfi).collect();
            epsilon = 0.5;
            for (ft, fi) in f_total.iter_mut().zip(&f) {
                *ft += fi;
            }
            inner_total += stats.inner_iterations;
            tracing::debug!(round, inner_iterations = stats.inner_iterations, "min_congestion_flow boosting round done");
        }
        Ok((
            f_total,
            status,
            SolverStats { outer_iterations: total_outer, inner_iterations: inner_total, solve_time_seconds: 0.0 },
        ))
    }

    /// Route `demands` as a maximum flow: run [`Solver::min_congestion_flow`]
    /// then rescale by the worst edge congestion actually achieved.
    /// Returns `(flow, flow_value, status, stats)`. Mirrors `max_flow`.
    pub fn max_flow(&self, demands: &[f64], epsilon: f64) -> Result<(Vec<f64>, f64, SolverStatus, SolverStats)> {
        let (flow, status, stats) = self.min_congestion_flow(demands, epsilon)?;
        let max_edge_congestion = self
            .graph
            .scale_by_inverse_capacity(&flow)
            .iter()
            .fold(0.0_f64, |acc, x| acc.max(x.abs()));
        if max_edge_congestion == 0.0 {
            return Ok((flow, 0.0, status, stats));
        }
        let scaled: Vec<f64> = flow.iter().map(|f| f / max_edge_congestion).collect();
        let sink_nodes: Vec<f64> = demands.iter().map(|&d| if d > 0.0 { 1.0 } else { 0.0 }).collect();
        let bf = self.graph.incidence_apply(&scaled);
        let flow_value: f64 = bf.iter().zip(&sink_nodes).map(|(a, b)| a * b).sum();
        Ok((scaled, flow_value, status, stats))
    }

    /// Maximum `source -> sink` flow. Mirrors `max_st_flow`.
    pub fn max_st_flow(
        &self,
        source: NodeId,
        sink: NodeId,
        epsilon: f64,
    ) -> Result<(Vec<f64>, f64, SolverStatus, SolverStats)> {
        let mut demands = vec![0.0; self.graph.num_nodes()];
        demands[source.0] = -1.0;
        demands[sink.0] = 1.0;
        self.max_flow(&demands, epsilon)
    }
}
