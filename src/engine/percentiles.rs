//! Percentile Extractor
//!
//! Reduces a Monte Carlo ensemble to P10/P50/P90 curves per depth using the
//! linear-interpolated quantile (type R-7, the spreadsheet convention).
//! Ordering `p10 <= p50 <= p90` holds by construction over sorted columns;
//! a violation would indicate a pipeline bug, not a physical anomaly.

use serde::{Deserialize, Serialize};

use super::monte_carlo::Ensemble;
use crate::types::DepthSeries;

/// P10/P50/P90 curves for one quantity, aligned to the source depth axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileTriple {
    pub p10: Vec<f64>,
    pub p50: Vec<f64>,
    pub p90: Vec<f64>,
}

/// Percentile curves for the quantities the pipeline screens downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileCurves {
    pub depths: DepthSeries,
    pub pp: PercentileTriple,
    pub fg: PercentileTriple,
    pub obg: PercentileTriple,
}

/// R-7 linear-interpolated quantile of an ascending-sorted slice.
///
/// `q` in [0, 1]. A single-element slice returns that element for every
/// quantile.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let h = (n - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let frac = h - lo as f64;
    if lo + 1 >= n {
        return sorted[n - 1];
    }
    sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
}

fn extract_triple(columns: &[Vec<f64>]) -> PercentileTriple {
    let mut p10 = Vec::with_capacity(columns.len());
    let mut p50 = Vec::with_capacity(columns.len());
    let mut p90 = Vec::with_capacity(columns.len());
    let mut scratch: Vec<f64> = Vec::new();
    for column in columns {
        scratch.clear();
        scratch.extend_from_slice(column);
        scratch.sort_by(f64::total_cmp);
        p10.push(quantile_sorted(&scratch, 0.10));
        p50.push(quantile_sorted(&scratch, 0.50));
        p90.push(quantile_sorted(&scratch, 0.90));
    }
    PercentileTriple { p10, p50, p90 }
}

/// Reduce an ensemble to percentile curves.
///
/// The ensemble always carries at least one surviving realization (the
/// Monte Carlo driver fails otherwise), so every depth column is non-empty.
pub fn extract(ensemble: &Ensemble) -> PercentileCurves {
    PercentileCurves {
        depths: ensemble.depths().clone(),
        pp: extract_triple(ensemble.pp()),
        fg: extract_triple(ensemble.fg()),
        obg: extract_triple(ensemble.obg()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::monte_carlo::{run, GradientModel, ModelError, SimulationOptions};
    use crate::engine::uncertainty::quantify;
    use crate::types::{GradientCurves, ParameterSet, UncertaintySettings};
    use tokio_util::sync::CancellationToken;

    #[test]
    fn quantile_matches_r7_reference() {
        // R-7 on [1, 2, 3, 4]: q25 = 1.75, q50 = 2.5, q75 = 3.25
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile_sorted(&sorted, 0.25) - 1.75).abs() < 1e-12);
        assert!((quantile_sorted(&sorted, 0.50) - 2.5).abs() < 1e-12);
        assert!((quantile_sorted(&sorted, 0.75) - 3.25).abs() < 1e-12);
    }

    #[test]
    fn quantile_endpoints() {
        let sorted = [10.0, 20.0, 30.0];
        assert_eq!(quantile_sorted(&sorted, 0.0), 10.0);
        assert_eq!(quantile_sorted(&sorted, 1.0), 30.0);
    }

    #[test]
    fn single_realization_repeats_value_across_percentiles() {
        let sorted = [42.0];
        assert_eq!(quantile_sorted(&sorted, 0.10), 42.0);
        assert_eq!(quantile_sorted(&sorted, 0.50), 42.0);
        assert_eq!(quantile_sorted(&sorted, 0.90), 42.0);
    }

    fn noisy_model(
        depths: &crate::types::DepthSeries,
        params: &ParameterSet,
    ) -> Result<GradientCurves, ModelError> {
        let pp: Vec<f64> = depths
            .iter()
            .map(|d| params.normal_gradient * d * params.eaton_exponent)
            .collect();
        let fg: Vec<f64> = depths.iter().map(|d| 0.8 * d).collect();
        let obg: Vec<f64> = depths.iter().map(|&d| d).collect();
        Ok(GradientCurves { pp, fg, obg })
    }

    fn sample_curves(n: usize) -> PercentileCurves {
        let depths = crate::types::DepthSeries::regular(1000.0, 3000.0, 100.0).unwrap();
        let base = ParameterSet::default();
        let uncertain = quantify(&base, &UncertaintySettings::uniform(0.15));
        let model: &dyn GradientModel = &noisy_model;
        let ensemble = run(
            model,
            &depths,
            &base,
            &uncertain,
            &SimulationOptions {
                realizations: n,
                seed: Some(99),
                ..Default::default()
            },
            &CancellationToken::new(),
        )
        .unwrap();
        extract(&ensemble)
    }

    #[test]
    fn percentile_ordering_holds_at_every_depth() {
        let curves = sample_curves(128);
        for i in 0..curves.depths.len() {
            assert!(curves.pp.p10[i] <= curves.pp.p50[i]);
            assert!(curves.pp.p50[i] <= curves.pp.p90[i]);
            assert!(curves.fg.p10[i] <= curves.fg.p50[i]);
            assert!(curves.fg.p50[i] <= curves.fg.p90[i]);
        }
    }

    #[test]
    fn single_realization_ensemble_collapses_percentiles() {
        let curves = sample_curves(1);
        assert_eq!(curves.pp.p10, curves.pp.p50);
        assert_eq!(curves.pp.p50, curves.pp.p90);
    }
}
