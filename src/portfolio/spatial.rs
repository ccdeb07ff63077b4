//! Multi-Well Spatial Aggregator
//!
//! Bins multiple wells' results onto a common depth axis and fits a planar
//! pressure trend across well locations at a chosen depth slice.
//!
//! A well with no sample near a bin is excluded from that bin — a data gap
//! is never treated as zero pressure. The trend fit returns `None` below
//! three qualifying wells; callers must not read `None` as zero risk.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use tracing::debug;

use crate::types::{spatial_defaults, ValidationError, WellRecord};

/// Cross-well statistics for one depth bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthBinStatistics {
    /// Bin center depth
    pub depth: f64,
    /// Wells contributing a sample to this bin
    pub well_count: usize,
    pub min_pp: f64,
    pub max_pp: f64,
    pub mean_pp: f64,
    pub mean_fg: f64,
}

/// Planar pressure trend over well locations at one depth slice:
/// `P ≈ x_gradient·x + y_gradient·y + c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialTrend {
    pub x_gradient: f64,
    pub y_gradient: f64,
    pub average_pressure: f64,
}

// ============================================================================
// Cross-well binned statistics
// ============================================================================

/// Bin all wells onto a common axis from 0 to the deepest sample at
/// `bin_step`, computing per-bin min/max/mean PP and mean FG.
///
/// Every well is validated against the curve-length invariant before any
/// statistics are computed. An empty portfolio yields an empty list.
pub fn aggregate_statistics(
    wells: &[WellRecord],
    bin_step: f64,
) -> Result<Vec<DepthBinStatistics>, ValidationError> {
    for well in wells {
        well.validate()?;
    }
    if wells.is_empty() {
        return Ok(Vec::new());
    }

    let max_depth = wells
        .iter()
        .map(|w| w.depths.max_depth())
        .fold(f64::NEG_INFINITY, f64::max);
    let step = if bin_step > 0.0 {
        bin_step
    } else {
        spatial_defaults::BIN_STEP
    };
    let half_step = step / 2.0;
    let bin_count = (max_depth / step).floor() as usize + 1;

    let mut bins = Vec::new();
    for b in 0..bin_count {
        let depth = b as f64 * step;
        let mut pp_samples = Vec::new();
        let mut fg_samples = Vec::new();

        for well in wells {
            // Nearest sample within half a step, or the well sits this
            // bin out.
            if let Some(idx) = well.depths.nearest_index_within(depth, half_step) {
                let pp = well.results.pp[idx];
                let fg = well.results.fg[idx];
                if pp.is_finite() {
                    pp_samples.push(pp);
                }
                if fg.is_finite() {
                    fg_samples.push(fg);
                }
            }
        }

        if pp_samples.is_empty() {
            continue;
        }

        bins.push(DepthBinStatistics {
            depth,
            well_count: pp_samples.len(),
            min_pp: Statistics::min(pp_samples.iter().copied()),
            max_pp: Statistics::max(pp_samples.iter().copied()),
            mean_pp: Statistics::mean(pp_samples.iter().copied()),
            mean_fg: if fg_samples.is_empty() {
                f64::NAN
            } else {
                Statistics::mean(fg_samples.iter().copied())
            },
        });
    }

    debug!(
        wells = wells.len(),
        bins = bins.len(),
        step,
        "aggregated cross-well statistics"
    );
    Ok(bins)
}

// ============================================================================
// Planar trend fit
// ============================================================================

/// Fit `P ≈ a·x + b·y + c` over well locations and their interpolated
/// pore pressure at `depth_slice`.
///
/// Requires at least three wells whose depth range covers the slice.
/// Returns `None` when fewer qualify or the well layout is degenerate
/// (collinear locations make the normal equations singular).
pub fn calculate_spatial_trend(wells: &[WellRecord], depth_slice: f64) -> Option<SpatialTrend> {
    let mut points: Vec<(f64, f64, f64)> = Vec::new();
    for well in wells {
        if well.validate().is_err() {
            continue;
        }
        if let Some(pp) = well.depths.interpolate(&well.results.pp, depth_slice) {
            if pp.is_finite() {
                points.push((well.location.x, well.location.y, pp));
            }
        }
    }

    if points.len() < spatial_defaults::MIN_WELLS_FOR_TREND {
        debug!(
            qualifying = points.len(),
            depth_slice, "spatial trend skipped: too few wells reach the slice"
        );
        return None;
    }

    // Normal equations for least-squares [a, b, c]:
    //   [Σxx Σxy Σx] [a]   [Σxp]
    //   [Σxy Σyy Σy] [b] = [Σyp]
    //   [Σx  Σy  n ] [c]   [Σp ]
    let n = points.len() as f64;
    let (mut sxx, mut sxy, mut syy, mut sx, mut sy) = (0.0, 0.0, 0.0, 0.0, 0.0);
    let (mut sxp, mut syp, mut sp) = (0.0, 0.0, 0.0);
    for &(x, y, p) in &points {
        sxx += x * x;
        sxy += x * y;
        syy += y * y;
        sx += x;
        sy += y;
        sxp += x * p;
        syp += y * p;
        sp += p;
    }

    let solution = solve_3x3(
        [[sxx, sxy, sx], [sxy, syy, sy], [sx, sy, n]],
        [sxp, syp, sp],
    )?;

    Some(SpatialTrend {
        x_gradient: solution[0],
        y_gradient: solution[1],
        average_pressure: sp / n,
    })
}

/// Gaussian elimination with partial pivoting; `None` on a singular
/// system.
fn solve_3x3(mut a: [[f64; 3]; 3], mut b: [f64; 3]) -> Option<[f64; 3]> {
    const EPS: f64 = 1e-10;
    for col in 0..3 {
        // Pivot on the largest remaining magnitude in this column.
        let mut pivot = col;
        for row in col + 1..3 {
            if a[row][col].abs() > a[pivot][col].abs() {
                pivot = row;
            }
        }
        if a[pivot][col].abs() < EPS {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..3 {
            let factor = a[row][col] / a[col][col];
            for k in col..3 {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0; 3];
    for col in (0..3).rev() {
        let mut sum = b[col];
        for k in col + 1..3 {
            sum -= a[col][k] * x[k];
        }
        x[col] = sum / a[col][col];
    }
    Some(x)
}
