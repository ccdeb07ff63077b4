//! Pipeline Integration Tests
//!
//! Exercises the full probabilistic pipeline against a reference
//! Eaton-style gradient model: Monte Carlo convergence to the
//! deterministic solution, seeded reproducibility, and screening of an
//! engineered narrow-window well.

use ppfg_engine::{
    engine, quantify, run_pipeline, AnomalySeverity, DepthSeries, GradientCurves, ModelError,
    ParameterSet, SimulationOptions, UncertaintySettings,
};
use tokio_util::sync::CancellationToken;

/// Reference deterministic model: Eaton pore pressure from a synthetic
/// sonic log, hydrostatic normal pressure, and a fixed FG fraction.
fn eaton_model(
    depths: &DepthSeries,
    params: &ParameterSet,
) -> Result<GradientCurves, ModelError> {
    let mut pp = Vec::with_capacity(depths.len());
    let mut fg = Vec::with_capacity(depths.len());
    let mut obg = Vec::with_capacity(depths.len());

    for &d in depths.iter() {
        let overburden = params.overburden_gradient * d;
        let hydrostatic = params.normal_gradient * d;

        // Normal compaction trend and a synthetic observed sonic that
        // compacts slightly slower than the trend (mild overpressure).
        let dt_normal = params.nct_intercept * (-params.nct_slope * d).exp();
        let dt_observed =
            params.dt_matrix + (params.dt_fluid - params.dt_matrix) * (-0.0003 * d).exp();

        let ratio = (dt_normal / dt_observed).clamp(0.0, 2.0);
        let pore = overburden - (overburden - hydrostatic) * ratio.powf(params.eaton_exponent);

        // Simple effective-stress fracture gradient between PP and OBG.
        let frac = pore + 0.7 * (overburden - pore);

        pp.push(pore);
        fg.push(frac);
        obg.push(overburden);
    }

    Ok(GradientCurves { pp, fg, obg })
}

fn planning_axis() -> DepthSeries {
    DepthSeries::regular(1000.0, 5000.0, 50.0).unwrap()
}

fn seeded_options(realizations: usize, seed: u64) -> SimulationOptions {
    SimulationOptions {
        realizations,
        seed: Some(seed),
        ..Default::default()
    }
}

/// Monte Carlo P50 converges to the deterministic curve: with 10%
/// uncertainty on every parameter and N=500, the P50 PP at TD must land
/// within 5% of the zero-uncertainty evaluation.
#[test]
fn p50_converges_to_deterministic_solution() {
    let depths = planning_axis();
    let base = ParameterSet::default();

    let deterministic = eaton_model(&depths, &base).unwrap();
    let result = run_pipeline(
        &eaton_model,
        &depths,
        "W-CONV",
        &base,
        &UncertaintySettings::uniform(0.10),
        &seeded_options(500, 1234),
        &CancellationToken::new(),
    )
    .unwrap();

    let last = depths.len() - 1;
    let det_pp = deterministic.pp[last];
    let p50_pp = result.percentiles.pp.p50[last];
    let relative_error = ((p50_pp - det_pp) / det_pp).abs();
    assert!(
        relative_error < 0.05,
        "P50 {p50_pp:.0} psi deviates {:.1}% from deterministic {det_pp:.0} psi",
        relative_error * 100.0
    );
}

/// Same seed, same N, same distributions: byte-identical percentile
/// curves across two full pipeline runs.
#[test]
fn seeded_runs_are_reproducible_end_to_end() {
    let depths = planning_axis();
    let base = ParameterSet::default();
    let settings = UncertaintySettings::uniform(0.10);

    let run_once = || {
        run_pipeline(
            &eaton_model,
            &depths,
            "W-REPRO",
            &base,
            &settings,
            &seeded_options(200, 77),
            &CancellationToken::new(),
        )
        .unwrap()
    };

    let a = run_once();
    let b = run_once();
    assert_eq!(a.percentiles, b.percentiles);
    assert_eq!(a.anomalies, b.anomalies);
    assert_eq!(a.plausibility, b.plausibility);
}

/// The quantifier and driver compose: percentile ordering holds at every
/// depth for every quantity after a full run.
#[test]
fn percentile_ordering_holds_across_full_run() {
    let depths = planning_axis();
    let base = ParameterSet::default();
    let uncertain = quantify(&base, &UncertaintySettings::uniform(0.15));

    let ensemble = engine::monte_carlo::run(
        &eaton_model,
        &depths,
        &base,
        &uncertain,
        &seeded_options(300, 5),
        &CancellationToken::new(),
    )
    .unwrap();
    let curves = engine::extract(&ensemble);

    for i in 0..depths.len() {
        for triple in [&curves.pp, &curves.fg, &curves.obg] {
            assert!(triple.p10[i] <= triple.p50[i]);
            assert!(triple.p50[i] <= triple.p90[i]);
        }
    }
}

/// A well engineered with a pinched window near TD surfaces both an
/// anomaly flag and a plausible (valid) report — a narrow window is
/// dangerous but not physically impossible.
#[test]
fn narrow_window_well_is_flagged_but_plausible() {
    let depths = planning_axis();

    // Squeeze FG toward PP below 4500 ft.
    let pinched_model = |depths: &DepthSeries, params: &ParameterSet| {
        let mut curves = eaton_model(depths, params)?;
        for (i, &d) in depths.iter().enumerate() {
            if d >= 4500.0 {
                curves.fg[i] = curves.pp[i] + 80.0;
            }
        }
        Ok(curves)
    };

    let result = run_pipeline(
        &pinched_model,
        &depths,
        "W-PINCH",
        &ParameterSet::default(),
        &UncertaintySettings::uniform(0.05),
        &seeded_options(200, 21),
        &CancellationToken::new(),
    )
    .unwrap();

    assert!(
        result
            .anomalies
            .iter()
            .any(|f| f.severity == AnomalySeverity::Critical),
        "expected a critical narrow-window flag, got {:?}",
        result.anomalies
    );
    assert!(result.plausibility.is_valid);
    assert_eq!(result.dropped_realizations, 0);
}

/// Dropped realizations are tolerated up to the success threshold and
/// reported in the pipeline result.
#[test]
fn sporadic_model_failures_survive_and_are_counted() {
    let depths = planning_axis();

    let counter = std::sync::atomic::AtomicUsize::new(0);
    let flaky_model = move |depths: &DepthSeries, params: &ParameterSet| {
        let k = counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if k % 5 == 0 {
            return Err(ModelError::new("solver did not converge"));
        }
        eaton_model(depths, params)
    };

    let result = run_pipeline(
        &flaky_model,
        &depths,
        "W-FLAKY",
        &ParameterSet::default(),
        &UncertaintySettings::uniform(0.10),
        &seeded_options(100, 9),
        &CancellationToken::new(),
    )
    .unwrap();

    assert_eq!(result.dropped_realizations, 20);
    // Percentiles still cover the full axis from the surviving columns.
    assert_eq!(result.percentiles.pp.p50.len(), depths.len());
}
