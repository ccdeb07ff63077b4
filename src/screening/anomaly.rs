//! Anomaly Detector
//!
//! Scans realized or percentile pressure curves for two operational
//! signatures:
//!
//! - **Narrow window**: FG − PP margin under 200 psi (critical under 100)
//! - **Pressure ramp**: local PP gradient above 1.0 psi/ft over a fixed
//!   sample lag
//!
//! Margin comparisons are strict `<` and gradient comparisons strict `>`,
//! matching the portfolio risk classifier. After a hit the scan skips
//! ahead a fixed depth distance so a single transition zone emits one flag
//! instead of flooding the list. Purely observational: input curves are
//! never mutated.

use tracing::debug;

use crate::types::{
    anomaly_thresholds, AnomalyFlag, AnomalyKind, AnomalySeverity, DepthSeries,
};

/// Scan tuning. Stride is a performance control for interactive use;
/// full-resolution scanning is not required.
#[derive(Debug, Clone, Copy)]
pub struct AnomalyScanOptions {
    /// Sample stride (1 = every sample)
    pub stride: usize,
    /// Depth distance skipped after a hit (depth units)
    pub skip_after_hit: f64,
    /// Sample lag for the local gradient estimate
    pub ramp_lag: usize,
}

impl Default for AnomalyScanOptions {
    fn default() -> Self {
        Self {
            stride: anomaly_thresholds::DEFAULT_STRIDE,
            skip_after_hit: anomaly_thresholds::SKIP_AFTER_HIT,
            ramp_lag: anomaly_thresholds::RAMP_LAG_SAMPLES,
        }
    }
}

/// Scan a well's PP/FG curves for narrow-window and ramp signatures.
///
/// Curves must align to the depth axis; mismatched inputs yield an empty
/// flag list (the pipeline validates lengths upstream). Flags come back
/// ordered by depth.
pub fn scan(
    well_id: &str,
    depths: &DepthSeries,
    pp: &[f64],
    fg: &[f64],
    options: &AnomalyScanOptions,
) -> Vec<AnomalyFlag> {
    let n = depths.len();
    if pp.len() != n || fg.len() != n {
        debug!(well_id, "anomaly scan skipped: curve length mismatch");
        return Vec::new();
    }
    let stride = options.stride.max(1);
    let axis = depths.as_slice();

    let mut flags = Vec::new();
    // Independent skip cursors so a window flag does not suppress a ramp
    // flag in the same interval.
    let mut window_resume = f64::NEG_INFINITY;
    let mut ramp_resume = f64::NEG_INFINITY;

    let mut i = 0;
    while i < n {
        let depth = axis[i];

        // Narrow drillable window
        if depth >= window_resume {
            let margin = fg[i] - pp[i];
            if margin.is_finite() && margin < anomaly_thresholds::NARROW_WINDOW_PSI {
                let severity = if margin < anomaly_thresholds::NARROW_WINDOW_CRITICAL_PSI {
                    AnomalySeverity::Critical
                } else {
                    AnomalySeverity::Major
                };
                flags.push(AnomalyFlag {
                    well_id: well_id.to_string(),
                    depth,
                    kind: AnomalyKind::NarrowWindow,
                    severity,
                    details: format!("FG-PP margin {margin:.0} psi"),
                });
                window_resume = depth + options.skip_after_hit;
            }
        }

        // Rapid pore-pressure ramp
        if depth >= ramp_resume && i >= options.ramp_lag {
            let j = i - options.ramp_lag;
            let depth_delta = axis[i] - axis[j];
            if depth_delta > 0.0 {
                let gradient = (pp[i] - pp[j]) / depth_delta;
                if gradient.is_finite() && gradient > anomaly_thresholds::RAMP_GRADIENT_PSI_FT {
                    flags.push(AnomalyFlag {
                        well_id: well_id.to_string(),
                        depth,
                        kind: AnomalyKind::PressureRamp,
                        severity: AnomalySeverity::Major,
                        details: format!("PP gradient {gradient:.2} psi/ft over {depth_delta:.0} units"),
                    });
                    ramp_resume = depth + options.skip_after_hit;
                }
            }
        }

        i += stride;
    }

    debug!(well_id, flags = flags.len(), "anomaly scan complete");
    flags
}
