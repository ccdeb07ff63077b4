//! Depth axis and curve containers
//!
//! Every curve in the engine is aligned to a `DepthSeries` — an ordered,
//! strictly increasing sequence of depth values shared by all curves of a
//! well. Validation happens once at construction so downstream components
//! never re-check monotonicity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Input invariant violations, rejected at component boundaries before any
/// computation begins.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("depth axis is empty")]
    EmptyDepthAxis,
    #[error("depth axis is not strictly increasing at index {index} ({previous} -> {value})")]
    NonMonotonicDepth {
        index: usize,
        previous: f64,
        value: f64,
    },
    #[error("depth axis contains a non-finite value at index {index}")]
    NonFiniteDepth { index: usize },
    #[error("curve '{curve}' has {actual} samples but the depth axis has {expected}")]
    CurveLengthMismatch {
        curve: String,
        expected: usize,
        actual: usize,
    },
    #[error("realization count must be positive")]
    ZeroRealizations,
}

// ============================================================================
// DepthSeries
// ============================================================================

/// Ordered, strictly increasing depth axis (ft or m) shared by all curves
/// of a well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct DepthSeries(Vec<f64>);

impl DepthSeries {
    /// Build a depth axis, validating the monotonicity invariant.
    pub fn new(depths: Vec<f64>) -> Result<Self, ValidationError> {
        if depths.is_empty() {
            return Err(ValidationError::EmptyDepthAxis);
        }
        for (i, &d) in depths.iter().enumerate() {
            if !d.is_finite() {
                return Err(ValidationError::NonFiniteDepth { index: i });
            }
            if i > 0 && d <= depths[i - 1] {
                return Err(ValidationError::NonMonotonicDepth {
                    index: i,
                    previous: depths[i - 1],
                    value: d,
                });
            }
        }
        Ok(Self(depths))
    }

    /// Build a regular axis from `start` to `end` (inclusive) at `step`.
    pub fn regular(start: f64, end: f64, step: f64) -> Result<Self, ValidationError> {
        if step <= 0.0 || end < start {
            return Err(ValidationError::EmptyDepthAxis);
        }
        let count = ((end - start) / step).floor() as usize + 1;
        let depths = (0..count).map(|i| start + i as f64 * step).collect();
        Self::new(depths)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// Shallowest depth on the axis.
    pub fn min_depth(&self) -> f64 {
        self.0[0]
    }

    /// Deepest depth on the axis.
    pub fn max_depth(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    /// True if `depth` lies within the axis range (inclusive).
    pub fn contains(&self, depth: f64) -> bool {
        depth >= self.min_depth() && depth <= self.max_depth()
    }

    /// Linearly interpolate `values` (aligned to this axis) at `depth`.
    ///
    /// Returns `None` when `depth` is outside the axis range or the curve
    /// length does not match; callers decide how to degrade.
    pub fn interpolate(&self, values: &[f64], depth: f64) -> Option<f64> {
        if values.len() != self.len() || !self.contains(depth) {
            return None;
        }
        // partition_point: first index with axis value > depth
        let hi = self.0.partition_point(|&d| d <= depth);
        if hi == 0 {
            return Some(values[0]);
        }
        if hi >= self.len() {
            return Some(values[self.len() - 1]);
        }
        let lo = hi - 1;
        let span = self.0[hi] - self.0[lo];
        let frac = (depth - self.0[lo]) / span;
        Some(values[lo] + frac * (values[hi] - values[lo]))
    }

    /// Index of the sample nearest to `depth`, if within `tolerance`.
    ///
    /// Used by the spatial aggregator to match wells onto a common binned
    /// axis without treating gaps as zeros.
    pub fn nearest_index_within(&self, depth: f64, tolerance: f64) -> Option<usize> {
        let hi = self.0.partition_point(|&d| d < depth);
        let mut best: Option<usize> = None;
        for idx in [hi.checked_sub(1), Some(hi)].into_iter().flatten() {
            if idx < self.len() {
                let dist = (self.0[idx] - depth).abs();
                if dist <= tolerance
                    && best.map_or(true, |b| dist < (self.0[b] - depth).abs())
                {
                    best = Some(idx);
                }
            }
        }
        best
    }
}

impl TryFrom<Vec<f64>> for DepthSeries {
    type Error = ValidationError;

    fn try_from(depths: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(depths)
    }
}

impl From<DepthSeries> for Vec<f64> {
    fn from(series: DepthSeries) -> Self {
        series.0
    }
}

// ============================================================================
// Gradient curves
// ============================================================================

/// The pressure curve triple produced by a deterministic gradient model:
/// pore pressure, fracture gradient, overburden gradient (psi), aligned to
/// one depth axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientCurves {
    pub pp: Vec<f64>,
    pub fg: Vec<f64>,
    pub obg: Vec<f64>,
}

impl GradientCurves {
    /// Validate that all three curves match the depth axis length.
    pub fn validate_against(&self, depths: &DepthSeries) -> Result<(), ValidationError> {
        for (name, curve) in [("pp", &self.pp), ("fg", &self.fg), ("obg", &self.obg)] {
            if curve.len() != depths.len() {
                return Err(ValidationError::CurveLengthMismatch {
                    curve: name.to_string(),
                    expected: depths.len(),
                    actual: curve.len(),
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// CurveSet
// ============================================================================

/// Named curves for a single well, all aligned to the same depth axis.
///
/// The pressure triple is first-class; additional log curves (GR, DT, RES)
/// ride in the `logs` map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveSet {
    pub depths: DepthSeries,
    pub pp: Vec<f64>,
    pub fg: Vec<f64>,
    pub obg: Vec<f64>,
    /// Auxiliary log curves keyed by mnemonic (e.g. "GR").
    #[serde(default)]
    pub logs: BTreeMap<String, Vec<f64>>,
}

impl CurveSet {
    /// Assemble a curve set, validating every curve against the axis.
    pub fn new(depths: DepthSeries, curves: GradientCurves) -> Result<Self, ValidationError> {
        curves.validate_against(&depths)?;
        Ok(Self {
            depths,
            pp: curves.pp,
            fg: curves.fg,
            obg: curves.obg,
            logs: BTreeMap::new(),
        })
    }

    /// Attach an auxiliary log curve, validating its length.
    pub fn with_log(mut self, mnemonic: &str, values: Vec<f64>) -> Result<Self, ValidationError> {
        if values.len() != self.depths.len() {
            return Err(ValidationError::CurveLengthMismatch {
                curve: mnemonic.to_string(),
                expected: self.depths.len(),
                actual: values.len(),
            });
        }
        self.logs.insert(mnemonic.to_string(), values);
        Ok(self)
    }
}
