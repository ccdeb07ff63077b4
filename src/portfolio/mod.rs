//! Portfolio-level aggregation
//!
//! Consumes `WellRecord`s from the external data source and produces the
//! cross-well views planning reads: binned field statistics, planar
//! pressure trends, and the risk/contingency summary.

pub mod risk;
pub mod spatial;

pub use risk::{assess_well, summarize};
pub use spatial::{
    aggregate_statistics, calculate_spatial_trend, DepthBinStatistics, SpatialTrend,
};
