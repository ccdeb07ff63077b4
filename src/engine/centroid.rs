//! Centroid / Tilted-Reservoir Corrector
//!
//! Inside a dipping sand body the pore pressure follows the fluid column,
//! not the regional shale trend: the two agree at the structure's centroid
//! and diverge away from it. This module produces that distinct sand-body
//! potential-pressure curve; the input shale curve is never mutated.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::DepthSeries;

/// Non-fatal configuration problems the corrector can signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CentroidWarning {
    /// Centroid depth lies outside the depth axis; the input curve was
    /// returned unchanged rather than extrapolated silently.
    CentroidOutsideRange,
    /// Curve length did not match the depth axis; input returned unchanged.
    CurveLengthMismatch,
}

/// Result of a centroid correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentroidResult {
    /// Sand-body potential pressure, aligned to the input axis.
    pub curve: Vec<f64>,
    /// Present when the correction could not be applied and the input was
    /// passed through.
    pub warning: Option<CentroidWarning>,
}

/// Build the sand-body pressure curve anchored at the centroid.
///
/// `pp_sand(d) = pp_regional(centroid) + fluid_gradient * (d - centroid)`.
/// A centroid outside the axis range returns the input unchanged plus a
/// structured warning — degrading gracefully beats extrapolating a fluid
/// column past the data.
pub fn apply_centroid(
    depths: &DepthSeries,
    base_pp: &[f64],
    centroid_depth: f64,
    fluid_gradient: f64,
) -> CentroidResult {
    if base_pp.len() != depths.len() {
        warn!(
            expected = depths.len(),
            actual = base_pp.len(),
            "centroid correction skipped: curve length mismatch"
        );
        return CentroidResult {
            curve: base_pp.to_vec(),
            warning: Some(CentroidWarning::CurveLengthMismatch),
        };
    }

    let Some(pp_centroid) = depths.interpolate(base_pp, centroid_depth) else {
        warn!(
            centroid_depth,
            min = depths.min_depth(),
            max = depths.max_depth(),
            "centroid depth outside axis range — returning input curve unchanged"
        );
        return CentroidResult {
            curve: base_pp.to_vec(),
            warning: Some(CentroidWarning::CentroidOutsideRange),
        };
    };

    let curve = depths
        .iter()
        .map(|&d| pp_centroid + fluid_gradient * (d - centroid_depth))
        .collect();

    CentroidResult {
        curve,
        warning: None,
    }
}
