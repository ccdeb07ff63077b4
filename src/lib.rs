//! PPFG Engine: Probabilistic Pore-Pressure / Fracture-Gradient Risk
//!
//! Library core for well-design risk analysis: turns uncertain
//! geomechanical parameters into depth-indexed probability distributions,
//! screens the results for dangerous or implausible signatures, and
//! aggregates risk across a well portfolio.
//!
//! ## Architecture
//!
//! - **Engine**: uncertainty quantification, Monte Carlo simulation over
//!   an injected deterministic gradient model, percentile extraction,
//!   centroid correction
//! - **Screening**: narrow-window / pressure-ramp anomaly scans and
//!   physical plausibility checks
//! - **Portfolio**: cross-well spatial aggregation and risk/contingency
//!   summaries
//! - **Scenario**: named parameter sets with pluggable persistence and
//!   deterministic comparison
//!
//! The deterministic gradient calculator is injected behind the
//! `GradientModel` trait; the engine never computes a pore pressure
//! itself, which keeps every component a pure data-in/data-out function.

pub mod config;
pub mod engine;
pub mod portfolio;
pub mod scenario;
pub mod screening;
pub mod types;

// Re-export engine configuration
pub use config::EngineConfig;

// Re-export commonly used types
pub use types::{
    AnomalyFlag, AnomalyKind, AnomalySeverity, CurveSet, DepthSeries, GradientCurves,
    ParameterName, ParameterSet, PlausibilityFlag, PlausibilityKind, PlausibilityReport,
    PortfolioRiskSummary, RiskLevel, Scenario, UncertainParameter, UncertaintySettings,
    ValidationError, WellLocation, WellRecord, WellRisk,
};

// Re-export the engine surface
pub use engine::{
    apply_centroid, quantify, run_pipeline, CentroidResult, CentroidWarning, Ensemble,
    GradientModel, ModelError, PercentileCurves, PercentileTriple, PipelineResult,
    SimulationError, SimulationOptions, UncertainParameterSet,
};

// Re-export screening scans
pub use screening::{check, scan, AnomalyScanOptions};

// Re-export portfolio aggregation
pub use portfolio::{
    aggregate_statistics, assess_well, calculate_spatial_trend, summarize,
    DepthBinStatistics, SpatialTrend,
};

// Re-export scenario management
pub use scenario::{
    compare, InMemoryScenarioStore, ScenarioComparison, ScenarioManager, ScenarioStore,
    SledScenarioStore, StoreError,
};
