//! Anomaly and plausibility flags
//!
//! Flags are first-class results, not errors: a kick/loss zone is something
//! the engine must surface to the user, never swallow.

use serde::{Deserialize, Serialize};

// ============================================================================
// Anomaly flags (operational signatures)
// ============================================================================

/// Signature an anomaly scan can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnomalyKind {
    /// FG − PP margin below the drillable-window threshold
    NarrowWindow,
    /// Local pore-pressure gradient exceeding the ramp threshold
    PressureRamp,
}

impl std::fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NarrowWindow => write!(f, "NARROW_WINDOW"),
            Self::PressureRamp => write!(f, "PRESSURE_RAMP"),
        }
    }
}

/// Severity of an operational anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnomalySeverity {
    Major,
    Critical,
}

impl std::fmt::Display for AnomalySeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Major => write!(f, "MAJOR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// One flagged depth in a well's pressure curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyFlag {
    pub well_id: String,
    pub depth: f64,
    pub kind: AnomalyKind,
    pub severity: AnomalySeverity,
    /// Human-readable context (margin value, gradient value)
    pub details: String,
}

// ============================================================================
// Plausibility flags (physical ordering violations)
// ============================================================================

/// Class of a physical-ordering violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlausibilityKind {
    /// PP above FG: operationally dangerous kick/loss zone
    Critical,
    /// PP above OBG: physically impossible under relaxed-basin assumptions,
    /// indicates bad input data
    DataError,
}

impl std::fmt::Display for PlausibilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "CRITICAL"),
            Self::DataError => write!(f, "DATA_ERROR"),
        }
    }
}

/// One physical-ordering violation at a sampled depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlausibilityFlag {
    pub depth: f64,
    pub kind: PlausibilityKind,
    pub message: String,
}

/// Outcome of a plausibility check over a curve set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlausibilityReport {
    /// True iff no `Critical` flag exists. DataError flags surface but do
    /// not invalidate the result on their own.
    pub is_valid: bool,
    pub flags: Vec<PlausibilityFlag>,
}

impl PlausibilityReport {
    /// Assemble a report, deriving validity from the flag list.
    pub fn from_flags(flags: Vec<PlausibilityFlag>) -> Self {
        let is_valid = !flags
            .iter()
            .any(|f| f.kind == PlausibilityKind::Critical);
        Self { is_valid, flags }
    }
}
