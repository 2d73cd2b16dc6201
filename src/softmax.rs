//! Symmetric (two-sided) log-sum-exp, the smooth surrogate for `‖·‖_∞`
//! that the Sherman solver's potential is built from.
//!
//! ```text
//! lse(x)      = log Σᵢ (e^xᵢ + e^-xᵢ)
//! ∇lse(x)_i   = (e^xᵢ - e^-xᵢ) / Σⱼ (e^xⱼ + e^-xⱼ)
//! ```
//!
//! Grounded on `examples/original_source/src/soft_max.py`. Unlike the
//! original's naive `np.exp(x) + np.exp(-x)` (which overflows for
//! `|x|` beyond a few hundred), both functions here shift by `max|xᵢ|`
//! before exponentiating, per the numeric policy in spec.md §4.1.

/// Two-sided log-sum-exp: `log Σᵢ (e^xᵢ + e^-xᵢ)`.
pub fn lse(x: &[f64]) -> f64 {
    let shift = max_abs(x);
    // e^xi + e^-xi = e^shift * (e^(xi-shift) + e^(-xi-shift))
    let sum: f64 = x
        .iter()
        .map(|&xi| (xi - shift).exp() + (-xi - shift).exp())
        .sum();
    shift + sum.ln()
}

/// Gradient of [`lse`]: `(e^xᵢ - e^-xᵢ) / Σⱼ (e^xⱼ + e^-xⱼ)`, computed
/// with the same overflow-avoiding shift (the shift cancels in the
/// ratio, so it need not match the one `lse` would use internally).
pub fn grad_lse(x: &[f64]) -> Vec<f64> {
    let shift = max_abs(x);
    let shifted: Vec<(f64, f64)> = x
        .iter()
        .map(|&xi| ((xi - shift).exp(), (-xi - shift).exp()))
        .collect();
    let denom: f64 = shifted.iter().map(|&(p, m)| p + m).sum();
    shifted.into_iter().map(|(p, m)| (p - m) / denom).collect()
}

fn max_abs(x: &[f64]) -> f64 {
    x.iter().fold(0.0_f64, |acc, &xi| acc.max(xi.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn zero_vector_is_log_of_2n() {
        let x = vec![0.0; 5];
        assert_relative_eq!(lse(&x), (2.0_f64 * 5.0).ln(), epsilon = 1e-12);
    }

    #[test]
    fn handles_large_magnitudes_without_overflow() {
        let x = vec![1000.0, -1000.0, 500.0];
        let v = lse(&x);
        assert!(v.is_finite());
        let g = grad_lse(&x);
        assert!(g.iter().all(|gi| gi.is_finite()));
    }

    proptest! {
        #[test]
        fn gradient_l1_norm_at_most_one(
            x in proptest::collection::vec(-50.0f64..50.0, 1..30)
        ) {
            let g = grad_lse(&x);
            let l1: f64 = g.iter().map(|gi| gi.abs()).sum();
            prop_assert!(l1 <= 1.0 + 1e-8);
        }

        #[test]
        fn fenchel_young_style_bound(
            x in proptest::collection::vec(-50.0f64..50.0, 1..30)
        ) {
            let n = x.len();
            let g = grad_lse(&x);
            let dot: f64 = g.iter().zip(&x).map(|(gi, xi)| gi * xi).sum();
            prop_assert!(dot >= lse(&x) - (2.0 * n as f64).ln() - 1e-8);
        }

        #[test]
        fn one_lipschitz_in_output_l1_vs_input_linf(
            x in proptest::collection::vec(-20.0f64..20.0, 1..20),
            y in proptest::collection::vec(-20.0f64..20.0, 1..20),
        ) {
            if x.len() == y.len() {
                let gx = grad_lse(&x);
                let gy = grad_lse(&y);
                let l1: f64 = gx.iter().zip(&gy).map(|(a, b)| (a - b).abs()).sum();
                let linf: f64 = x.iter().zip(&y).map(|(a, b)| (a - b).abs()).fold(0.0, f64::max);
                prop_assert!(l1 <= linf + 1e-6);
            }
        }
    }
}
