//! Well records consumed by the portfolio-level components
//!
//! Produced by an external data source (import and persistence are not this
//! crate's concern); the engine only reads them.

use serde::{Deserialize, Serialize};

use super::curves::{DepthSeries, GradientCurves, ValidationError};

/// Surface location of a well, in field coordinates (ft or m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellLocation {
    pub x: f64,
    pub y: f64,
}

/// A well with computed pressure results, as supplied by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellRecord {
    pub id: String,
    pub name: String,
    pub location: WellLocation,
    pub depths: DepthSeries,
    pub results: GradientCurves,
}

impl WellRecord {
    /// Validate the curve-length invariant against the well's depth axis.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.results.validate_against(&self.depths)
    }
}
