//! Probabilistic PPFG Engine
//!
//! Turns uncertain geomechanical parameters into depth-indexed probability
//! distributions. All math here is pure statistics over an injected
//! deterministic gradient model — the engine never computes a pore
//! pressure itself.
//!
//! ## Pipeline stages
//! - `uncertainty`: base parameters + relative spreads → distributions
//! - `monte_carlo`: N sampled evaluations → per-depth ensembles
//! - `percentiles`: ensembles → P10/P50/P90 curves (R-7 quantiles)
//! - `centroid`: sand-body potential pressure from a fluid-contact model
//!
//! Each stage is callable alone; `run_pipeline` composes them with the
//! downstream screening scans the way interactive callers consume the
//! engine.

pub mod centroid;
pub mod monte_carlo;
pub mod percentiles;
pub mod uncertainty;

pub use centroid::{apply_centroid, CentroidResult, CentroidWarning};
pub use monte_carlo::{
    Ensemble, GradientModel, ModelError, SimulationError, SimulationOptions,
};
pub use percentiles::{extract, PercentileCurves, PercentileTriple};
pub use uncertainty::{quantify, UncertainParameterSet};

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::screening::{self, AnomalyScanOptions};
use crate::types::{
    AnomalyFlag, DepthSeries, ParameterSet, PlausibilityReport, UncertaintySettings,
};

/// Everything one probabilistic run produces for a well.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub percentiles: PercentileCurves,
    /// Anomaly scan over the P50 PP/FG curves
    pub anomalies: Vec<AnomalyFlag>,
    /// Plausibility check over the P50 curves
    pub plausibility: PlausibilityReport,
    /// Realizations dropped due to model failures
    pub dropped_realizations: usize,
}

/// Quantify → simulate → extract → screen.
///
/// The screening scans run over the P50 curves: the median realization is
/// what operations planning reads first, and per-realization scans belong
/// to the caller if needed.
pub fn run_pipeline(
    model: &dyn GradientModel,
    depths: &DepthSeries,
    well_id: &str,
    base: &ParameterSet,
    settings: &UncertaintySettings,
    options: &SimulationOptions,
    cancel: &CancellationToken,
) -> Result<PipelineResult, SimulationError> {
    let uncertain = quantify(base, settings);
    let ensemble = monte_carlo::run(model, depths, base, &uncertain, options, cancel)?;
    let percentiles = extract(&ensemble);

    let anomalies = screening::anomaly::scan(
        well_id,
        depths,
        &percentiles.pp.p50,
        &percentiles.fg.p50,
        &AnomalyScanOptions::default(),
    );
    let plausibility = screening::plausibility::check(
        depths,
        &percentiles.pp.p50,
        &percentiles.fg.p50,
        &percentiles.obg.p50,
        1,
    );

    info!(
        well_id,
        realizations = ensemble.realization_count(),
        dropped = ensemble.dropped(),
        anomalies = anomalies.len(),
        plausible = plausibility.is_valid,
        "pipeline run complete"
    );

    Ok(PipelineResult {
        percentiles,
        anomalies,
        plausibility,
        dropped_realizations: ensemble.dropped(),
    })
}
