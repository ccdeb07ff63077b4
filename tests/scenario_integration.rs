//! Scenario Manager Integration Tests
//!
//! Scenario lifecycle over the sled-backed store and deterministic
//! comparison through the injected gradient model.

use ppfg_engine::{
    compare, DepthSeries, GradientCurves, ModelError, ParameterSet, Scenario, ScenarioManager,
    ScenarioStore, SledScenarioStore,
};

fn linear_model(
    depths: &DepthSeries,
    params: &ParameterSet,
) -> Result<GradientCurves, ModelError> {
    let pp: Vec<f64> = depths
        .iter()
        .map(|d| params.normal_gradient * d * params.eaton_exponent)
        .collect();
    let fg: Vec<f64> = depths.iter().map(|d| 0.8 * d).collect();
    let obg: Vec<f64> = depths.iter().map(|&d| d).collect();
    Ok(GradientCurves { pp, fg, obg })
}

#[test]
fn scenarios_survive_a_store_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let first_id;
    {
        let store = SledScenarioStore::open(dir.path()).unwrap();
        let mut manager = ScenarioManager::open(store).unwrap();
        first_id = manager.create("base case", ParameterSet::default(), "field defaults");
        let mut pessimistic = ParameterSet::default();
        pessimistic.eaton_exponent = 1.3;
        manager.create("pessimistic", pessimistic, "high compaction response");
        manager.persist().unwrap();
    }

    // Reopen from disk in a fresh manager.
    let store = SledScenarioStore::open(dir.path()).unwrap();
    let manager = ScenarioManager::open(store).unwrap();
    assert_eq!(manager.list().len(), 2);
    let base = manager.get(first_id).unwrap();
    assert_eq!(base.name, "base case");
    assert_eq!(base.parameters.eaton_exponent, 1.0);
}

#[test]
fn edits_persist_with_bumped_timestamps() {
    let dir = tempfile::tempdir().unwrap();
    let store = SledScenarioStore::open(dir.path()).unwrap();
    let mut manager = ScenarioManager::open(store).unwrap();

    let id = manager.create("base case", ParameterSet::default(), "");
    let created_at = manager.get(id).unwrap().created_at;

    let mut edited = ParameterSet::default();
    edited.nct_slope = 0.00025;
    assert!(manager.update_parameters(id, edited));
    manager.persist().unwrap();
    manager.reload().unwrap();

    let scenario = manager.get(id).unwrap();
    assert_eq!(scenario.parameters.nct_slope, 0.00025);
    assert!(scenario.modified_at >= created_at);
}

#[test]
fn comparison_diffs_pore_pressure_pointwise() {
    let depths = DepthSeries::regular(1000.0, 3000.0, 100.0).unwrap();
    let a = Scenario::new("base", ParameterSet::default(), "");
    let mut raised = ParameterSet::default();
    raised.normal_gradient = 0.5;
    let b = Scenario::new("raised hydrostatic", raised, "");

    let comparison = compare(&a, &b, &depths, &linear_model).unwrap();
    for (i, &d) in depths.iter().enumerate() {
        let expected = (0.465 - 0.5) * d;
        assert!((comparison.diff_pp[i] - expected).abs() < 1e-9);
    }
}

#[test]
fn identical_scenarios_diff_to_all_zeros() {
    let depths = DepthSeries::regular(1000.0, 3000.0, 100.0).unwrap();
    let a = Scenario::new("a", ParameterSet::default(), "");
    let b = Scenario::new("b", ParameterSet::default(), "");
    let comparison = compare(&a, &b, &depths, &linear_model).unwrap();
    assert!(comparison.diff_pp.iter().all(|&d| d == 0.0));
}

#[test]
fn store_trait_object_is_usable_behind_a_box() {
    // Downstream callers hold stores as trait objects; make sure the
    // surface stays object-safe.
    let dir = tempfile::tempdir().unwrap();
    let store: Box<dyn ScenarioStore> = Box::new(SledScenarioStore::open(dir.path()).unwrap());
    store
        .save(&[Scenario::new("boxed", ParameterSet::default(), "")])
        .unwrap();
    assert_eq!(store.load().unwrap().len(), 1);
    assert_eq!(store.backend_name(), "sled");
}
