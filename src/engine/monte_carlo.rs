//! Monte Carlo Driver
//!
//! Samples per-parameter distributions N times, evaluates the injected
//! deterministic gradient model per draw, and accumulates per-depth
//! ensembles of PP/FG/OBG.
//!
//! ## Determinism
//!
//! Draws are consumed sequentially from a single seeded RNG before any
//! parallel work starts; realizations are then evaluated across the rayon
//! pool and written back by index. Identical seed + N + distributions
//! reproduce identical ensembles regardless of thread scheduling.
//!
//! ## Failure tolerance
//!
//! A model failure drops that realization and counts a warning. The run
//! fails only when successes fall below the configured minimum fraction,
//! or when the cancellation token fires (partial ensembles are discarded,
//! never returned).

use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::uncertainty::UncertainParameterSet;
use crate::types::{
    simulation_defaults, DepthSeries, GradientCurves, ParameterName, ParameterSet,
    ValidationError,
};

// ============================================================================
// Injected model boundary
// ============================================================================

/// Failure reported by a gradient model for one evaluation.
#[derive(Debug, Clone, Error)]
#[error("gradient model failure: {message}")]
pub struct ModelError {
    pub message: String,
}

impl ModelError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The deterministic gradient calculator, injected by the caller.
///
/// Implementations must be pure: same depth axis + same parameters must
/// produce the same curves, each matching the axis length. The engine
/// never inspects how the curves are computed (Eaton, Bowers, or
/// otherwise).
pub trait GradientModel: Sync {
    fn evaluate(
        &self,
        depths: &DepthSeries,
        params: &ParameterSet,
    ) -> Result<GradientCurves, ModelError>;
}

impl<F> GradientModel for F
where
    F: Fn(&DepthSeries, &ParameterSet) -> Result<GradientCurves, ModelError> + Sync,
{
    fn evaluate(
        &self,
        depths: &DepthSeries,
        params: &ParameterSet,
    ) -> Result<GradientCurves, ModelError> {
        self(depths, params)
    }
}

// ============================================================================
// Options & errors
// ============================================================================

/// Tuning for one Monte Carlo run.
#[derive(Debug, Clone, Copy)]
pub struct SimulationOptions {
    /// Number of realizations to draw
    pub realizations: usize,
    /// Seed for reproducible runs; `None` draws from entropy
    pub seed: Option<u64>,
    /// Minimum fraction of realizations that must succeed
    pub min_success_fraction: f64,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            realizations: simulation_defaults::REALIZATIONS,
            seed: None,
            min_success_fraction: simulation_defaults::MIN_SUCCESS_FRACTION,
        }
    }
}

/// Monte Carlo run failures.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),
    /// The cancellation token fired mid-run; partial results are discarded.
    #[error("simulation cancelled")]
    Cancelled,
    #[error(
        "only {succeeded} of {requested} realizations succeeded \
         (minimum fraction {minimum_fraction}); last error: {last_error}"
    )]
    TooManyFailures {
        succeeded: usize,
        requested: usize,
        minimum_fraction: f64,
        last_error: String,
    },
}

// ============================================================================
// Ensemble
// ============================================================================

/// Per-depth realization columns for PP/FG/OBG.
///
/// Shape is `[depth][realization]`; dropped realizations are absent, so
/// column width is the success count, not the requested count. Transient:
/// consumed by the percentile extractor, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Ensemble {
    depths: DepthSeries,
    pp: Vec<Vec<f64>>,
    fg: Vec<Vec<f64>>,
    obg: Vec<Vec<f64>>,
    requested: usize,
    dropped: usize,
}

impl Ensemble {
    pub fn depths(&self) -> &DepthSeries {
        &self.depths
    }

    /// Surviving realization count (columns per depth).
    pub fn realization_count(&self) -> usize {
        self.requested - self.dropped
    }

    /// Realizations requested before any drops.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Realizations dropped due to model failures.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn pp(&self) -> &[Vec<f64>] {
        &self.pp
    }

    pub fn fg(&self) -> &[Vec<f64>] {
        &self.fg
    }

    pub fn obg(&self) -> &[Vec<f64>] {
        &self.obg
    }
}

// ============================================================================
// Sampling
// ============================================================================

/// One sampler per parameter; `None` when the spread is zero (the mean is
/// used directly, avoiding a degenerate distribution).
struct ParameterSampler {
    name: ParameterName,
    mean: f64,
    normal: Option<Normal<f64>>,
}

fn build_samplers(uncertain: &UncertainParameterSet) -> Vec<ParameterSampler> {
    uncertain
        .entries()
        .iter()
        .map(|&(name, p)| {
            let normal = if p.std_dev > 0.0 {
                // std_dev is validated non-negative by the quantifier
                Normal::new(p.mean, p.std_dev).ok()
            } else {
                None
            };
            ParameterSampler {
                name,
                mean: p.mean,
                normal,
            }
        })
        .collect()
}

/// Draw one value, resampling negative draws for physically non-negative
/// parameters. After the retry budget is spent the draw clamps to zero.
fn sample_parameter(rng: &mut StdRng, sampler: &ParameterSampler) -> f64 {
    let Some(normal) = sampler.normal else {
        return sampler.mean;
    };
    if !sampler.name.is_non_negative() {
        return normal.sample(rng);
    }
    for _ in 0..=simulation_defaults::RESAMPLE_RETRIES {
        let draw = normal.sample(rng);
        if draw >= 0.0 {
            return draw;
        }
    }
    0.0
}

/// Draw all N concrete parameter sets sequentially from one RNG.
fn draw_realizations(
    uncertain: &UncertainParameterSet,
    base: &ParameterSet,
    options: &SimulationOptions,
) -> Vec<ParameterSet> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let samplers = build_samplers(uncertain);

    (0..options.realizations)
        .map(|_| {
            let mut params = base.clone();
            for sampler in &samplers {
                params.set(sampler.name, sample_parameter(&mut rng, sampler));
            }
            params
        })
        .collect()
}

// ============================================================================
// Run
// ============================================================================

/// Execute a Monte Carlo run against the injected model.
///
/// `base` supplies the means (and any parameters outside the uncertain
/// set); `uncertain` supplies the per-parameter spreads. Cancellation is
/// checked per realization; on cancel the partial ensemble is discarded.
pub fn run(
    model: &dyn GradientModel,
    depths: &DepthSeries,
    base: &ParameterSet,
    uncertain: &UncertainParameterSet,
    options: &SimulationOptions,
    cancel: &CancellationToken,
) -> Result<Ensemble, SimulationError> {
    if options.realizations == 0 {
        return Err(ValidationError::ZeroRealizations.into());
    }

    let draws = draw_realizations(uncertain, base, options);
    debug!(
        realizations = options.realizations,
        seed = ?options.seed,
        "drew parameter realizations"
    );

    // Each realization evaluates independently and lands in its own slot;
    // the collect preserves index order, so results are deterministic for
    // a pure model regardless of scheduling.
    let results: Vec<Result<GradientCurves, ModelError>> = draws
        .par_iter()
        .map(|params| {
            if cancel.is_cancelled() {
                return Err(ModelError::new("cancelled"));
            }
            let curves = model.evaluate(depths, params)?;
            curves
                .validate_against(depths)
                .map_err(|e| ModelError::new(e.to_string()))?;
            Ok(curves)
        })
        .collect();

    if cancel.is_cancelled() {
        info!("simulation cancelled — discarding partial ensemble");
        return Err(SimulationError::Cancelled);
    }

    let requested = options.realizations;
    let mut last_error = String::new();
    let mut successes: Vec<&GradientCurves> = Vec::with_capacity(requested);
    for result in &results {
        match result {
            Ok(curves) => successes.push(curves),
            Err(e) => last_error = e.to_string(),
        }
    }

    let succeeded = successes.len();
    let dropped = requested - succeeded;
    if dropped > 0 {
        warn!(
            dropped,
            requested,
            last_error = %last_error,
            "model failures dropped realizations"
        );
    }

    let minimum_fraction = options.min_success_fraction;
    if succeeded == 0 || (succeeded as f64) < minimum_fraction * (requested as f64) {
        return Err(SimulationError::TooManyFailures {
            succeeded,
            requested,
            minimum_fraction,
            last_error,
        });
    }

    // Transpose realization-major results into depth-major columns.
    let n_depths = depths.len();
    let mut pp = vec![Vec::with_capacity(succeeded); n_depths];
    let mut fg = vec![Vec::with_capacity(succeeded); n_depths];
    let mut obg = vec![Vec::with_capacity(succeeded); n_depths];
    for curves in &successes {
        for i in 0..n_depths {
            pp[i].push(curves.pp[i]);
            fg[i].push(curves.fg[i]);
            obg[i].push(curves.obg[i]);
        }
    }

    info!(
        requested,
        succeeded,
        dropped,
        depths = n_depths,
        "monte carlo run complete"
    );

    Ok(Ensemble {
        depths: depths.clone(),
        pp,
        fg,
        obg,
        requested,
        dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::uncertainty::quantify;
    use crate::types::UncertaintySettings;

    /// Linear-in-depth toy model: pp grows with eaton_exponent so parameter
    /// spread is visible in the ensemble.
    fn toy_model(
        depths: &DepthSeries,
        params: &ParameterSet,
    ) -> Result<GradientCurves, ModelError> {
        let pp: Vec<f64> = depths
            .iter()
            .map(|d| params.normal_gradient * d * params.eaton_exponent)
            .collect();
        let fg: Vec<f64> = depths.iter().map(|d| 0.8 * d).collect();
        let obg: Vec<f64> = depths
            .iter()
            .map(|d| params.overburden_gradient * d)
            .collect();
        Ok(GradientCurves { pp, fg, obg })
    }

    fn axis() -> DepthSeries {
        DepthSeries::regular(1000.0, 2000.0, 100.0).unwrap()
    }

    fn options(n: usize, seed: u64) -> SimulationOptions {
        SimulationOptions {
            realizations: n,
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn identical_seeds_reproduce_identical_ensembles() {
        let depths = axis();
        let base = ParameterSet::default();
        let uncertain = quantify(&base, &UncertaintySettings::uniform(0.1));
        let cancel = CancellationToken::new();

        let a = run(&toy_model, &depths, &base, &uncertain, &options(64, 42), &cancel).unwrap();
        let b = run(&toy_model, &depths, &base, &uncertain, &options(64, 42), &cancel).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let depths = axis();
        let base = ParameterSet::default();
        let uncertain = quantify(&base, &UncertaintySettings::uniform(0.1));
        let cancel = CancellationToken::new();

        let a = run(&toy_model, &depths, &base, &uncertain, &options(64, 1), &cancel).unwrap();
        let b = run(&toy_model, &depths, &base, &uncertain, &options(64, 2), &cancel).unwrap();
        assert_ne!(a.pp(), b.pp());
    }

    #[test]
    fn ensemble_shape_matches_axis_and_successes() {
        let depths = axis();
        let base = ParameterSet::default();
        let uncertain = quantify(&base, &UncertaintySettings::uniform(0.1));
        let cancel = CancellationToken::new();

        let ensemble =
            run(&toy_model, &depths, &base, &uncertain, &options(32, 7), &cancel).unwrap();
        assert_eq!(ensemble.pp().len(), depths.len());
        assert_eq!(ensemble.realization_count(), 32);
        assert!(ensemble.pp().iter().all(|col| col.len() == 32));
    }

    #[test]
    fn zero_realizations_rejected_at_boundary() {
        let depths = axis();
        let base = ParameterSet::default();
        let uncertain = quantify(&base, &UncertaintySettings::default());
        let cancel = CancellationToken::new();
        let opts = SimulationOptions {
            realizations: 0,
            ..Default::default()
        };

        let result = run(&toy_model, &depths, &base, &uncertain, &opts, &cancel);
        assert!(matches!(result, Err(SimulationError::InvalidInput(_))));
    }

    #[test]
    fn failing_model_below_threshold_fails_run() {
        let depths = axis();
        let base = ParameterSet::default();
        let uncertain = quantify(&base, &UncertaintySettings::uniform(0.1));
        let cancel = CancellationToken::new();

        let always_fail = |_: &DepthSeries, _: &ParameterSet| -> Result<GradientCurves, ModelError> {
            Err(ModelError::new("convergence failure"))
        };
        let result = run(&always_fail, &depths, &base, &uncertain, &options(16, 3), &cancel);
        match result {
            Err(SimulationError::TooManyFailures {
                succeeded,
                requested,
                ..
            }) => {
                assert_eq!(succeeded, 0);
                assert_eq!(requested, 16);
            }
            other => panic!("expected TooManyFailures, got {other:?}"),
        }
    }

    #[test]
    fn half_successes_meet_half_threshold() {
        let depths = axis();
        let base = ParameterSet::default();
        let uncertain = quantify(&base, &UncertaintySettings::uniform(0.1));
        let cancel = CancellationToken::new();

        // Drive the success/failure split deterministically: every other
        // evaluation fails, landing exactly on the 50% threshold.
        let counter = std::sync::atomic::AtomicUsize::new(0);
        let half_fail = move |depths: &DepthSeries, params: &ParameterSet| {
            let k = counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if k % 2 == 0 {
                toy_model(depths, params)
            } else {
                Err(ModelError::new("sporadic failure"))
            }
        };
        let ensemble =
            run(&half_fail, &depths, &base, &uncertain, &options(16, 3), &cancel).unwrap();
        assert_eq!(ensemble.realization_count(), 8);
        assert_eq!(ensemble.dropped(), 8);
    }

    #[test]
    fn cancelled_token_discards_partial_results() {
        let depths = axis();
        let base = ParameterSet::default();
        let uncertain = quantify(&base, &UncertaintySettings::uniform(0.1));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = run(&toy_model, &depths, &base, &uncertain, &options(64, 5), &cancel);
        assert!(matches!(result, Err(SimulationError::Cancelled)));
    }

    #[test]
    fn non_negative_parameters_never_go_negative() {
        let depths = axis();
        // Large spread so the untruncated normal would frequently draw
        // negative values.
        let mut base = ParameterSet::default();
        base.nct_slope = 0.0002;
        let uncertain = quantify(&base, &UncertaintySettings::uniform(3.0));
        let cancel = CancellationToken::new();

        let observed_min = std::sync::Mutex::new(f64::INFINITY);
        let probe = |depths: &DepthSeries, params: &ParameterSet| {
            let mut min = observed_min.lock().map_err(|_| ModelError::new("poisoned"))?;
            for (_, value) in params.entries() {
                if value < *min {
                    *min = value;
                }
            }
            drop(min);
            toy_model(depths, params)
        };
        run(&probe, &depths, &base, &uncertain, &options(256, 11), &cancel).unwrap();
        assert!(*observed_min.lock().unwrap() >= 0.0);
    }
}
