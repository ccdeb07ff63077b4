//! Shared data structures for the PPFG risk engine
//!
//! This module defines the core types flowing through the pipeline:
//! - Depth axes and curve containers (`DepthSeries`, `CurveSet`)
//! - Geomechanical parameters and uncertainty envelopes (`ParameterSet`)
//! - Anomaly and plausibility flags (first-class results, not errors)
//! - Portfolio risk classification (`WellRisk`, `PortfolioRiskSummary`)
//! - Persistable scenarios (`Scenario`)
//! - Well records consumed at the portfolio level (`WellRecord`)

mod curves;
mod flags;
mod params;
mod risk;
mod scenario;
// Public because it contains the per-subsystem constant sub-modules
// which must remain accessible as `types::anomaly_thresholds` etc.
pub mod thresholds;
mod well;

pub use curves::*;
pub use flags::*;
pub use params::*;
pub use risk::*;
pub use scenario::*;
pub use thresholds::*;
pub use well::*;
