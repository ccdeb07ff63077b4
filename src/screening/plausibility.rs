//! Plausibility Checker
//!
//! Enforces the physical ordering PP <= FG <= OBG over a curve set:
//!
//! - `PP > FG` is a **Critical** "Kick/Loss Zone": operationally dangerous
//!   and must surface to the user
//! - `PP > OBG` is a **DataError**: impossible under relaxed-basin
//!   assumptions, so the inputs are suspect
//!
//! Both are results, not errors: the checker reports, callers decide.

use tracing::debug;

use crate::types::{DepthSeries, PlausibilityFlag, PlausibilityKind, PlausibilityReport};

/// Check physical ordering at a sampling stride.
///
/// Non-finite samples are skipped; data gaps are a quality concern, not a
/// physics verdict. `is_valid` is true iff no Critical flag was emitted;
/// DataError flags surface without invalidating the result.
pub fn check(
    depths: &DepthSeries,
    pp: &[f64],
    fg: &[f64],
    obg: &[f64],
    stride: usize,
) -> PlausibilityReport {
    let n = depths.len();
    if pp.len() != n || fg.len() != n || obg.len() != n {
        debug!("plausibility check skipped: curve length mismatch");
        return PlausibilityReport::from_flags(Vec::new());
    }
    let stride = stride.max(1);
    let axis = depths.as_slice();

    let mut flags = Vec::new();
    let mut i = 0;
    while i < n {
        let depth = axis[i];
        let (p, f, o) = (pp[i], fg[i], obg[i]);

        if p.is_finite() && f.is_finite() && p > f {
            flags.push(PlausibilityFlag {
                depth,
                kind: PlausibilityKind::Critical,
                message: format!(
                    "Kick/Loss Zone: PP {p:.0} psi exceeds FG {f:.0} psi"
                ),
            });
        }
        if p.is_finite() && o.is_finite() && p > o {
            flags.push(PlausibilityFlag {
                depth,
                kind: PlausibilityKind::DataError,
                message: format!(
                    "PP {p:.0} psi exceeds OBG {o:.0} psi (check input data)"
                ),
            });
        }

        i += stride;
    }

    debug!(flags = flags.len(), "plausibility check complete");
    PlausibilityReport::from_flags(flags)
}
