//! Scenario Manager
//!
//! Names, persists, and diffs parameter sets. Comparison re-runs the
//! injected deterministic model once per scenario and differences the pore
//! pressure curves pointwise — neither scenario is mutated.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::store::{ScenarioStore, StoreError};
use crate::engine::monte_carlo::{GradientModel, ModelError};
use crate::types::{DepthSeries, GradientCurves, ParameterSet, Scenario};

/// Deterministic comparison of two scenarios over one depth axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub result_a: GradientCurves,
    pub result_b: GradientCurves,
    /// `diff_pp[i] = result_a.pp[i] - result_b.pp[i]`
    pub diff_pp: Vec<f64>,
}

/// Run the model once per scenario and difference the PP curves.
///
/// Both scenarios are read through parameter snapshots; the originals are
/// untouched. Identical parameters yield an all-zero diff.
pub fn compare(
    a: &Scenario,
    b: &Scenario,
    depths: &DepthSeries,
    model: &dyn GradientModel,
) -> Result<ScenarioComparison, ModelError> {
    let result_a = model.evaluate(depths, &a.snapshot())?;
    let result_b = model.evaluate(depths, &b.snapshot())?;
    result_a
        .validate_against(depths)
        .map_err(|e| ModelError::new(e.to_string()))?;
    result_b
        .validate_against(depths)
        .map_err(|e| ModelError::new(e.to_string()))?;

    let diff_pp = result_a
        .pp
        .iter()
        .zip(result_b.pp.iter())
        .map(|(pa, pb)| pa - pb)
        .collect();

    debug!(a = %a.name, b = %b.name, "scenario comparison complete");
    Ok(ScenarioComparison {
        result_a,
        result_b,
        diff_pp,
    })
}

// ============================================================================
// Manager
// ============================================================================

/// In-memory scenario registry backed by an injected store.
///
/// The working set lives in memory; `persist`/`reload` exchange the full
/// list with the store. Generic over the backend so tests run against the
/// in-memory store and deployments against sled.
pub struct ScenarioManager<S: ScenarioStore> {
    store: S,
    scenarios: Vec<Scenario>,
}

impl<S: ScenarioStore> ScenarioManager<S> {
    /// Create a manager over a store, loading any persisted scenarios.
    pub fn open(store: S) -> Result<Self, StoreError> {
        let scenarios = store.load()?;
        info!(
            backend = store.backend_name(),
            count = scenarios.len(),
            "scenario manager opened"
        );
        Ok(Self { store, scenarios })
    }

    /// Create a scenario and add it to the working set.
    pub fn create(&mut self, name: &str, parameters: ParameterSet, description: &str) -> Uuid {
        let scenario = Scenario::new(name, parameters, description);
        let id = scenario.id;
        debug!(%id, name, "scenario created");
        self.scenarios.push(scenario);
        id
    }

    pub fn get(&self, id: Uuid) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn list(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Replace a scenario's parameters through the sanctioned setter.
    ///
    /// Returns false when the id is unknown.
    pub fn update_parameters(&mut self, id: Uuid, parameters: ParameterSet) -> bool {
        match self.scenarios.iter_mut().find(|s| s.id == id) {
            Some(scenario) => {
                scenario.set_parameters(parameters);
                true
            }
            None => false,
        }
    }

    /// Remove a scenario from the working set.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.scenarios.len();
        self.scenarios.retain(|s| s.id != id);
        self.scenarios.len() != before
    }

    /// Write the working set through to the store.
    pub fn persist(&self) -> Result<(), StoreError> {
        self.store.save(&self.scenarios)?;
        debug!(
            backend = self.store.backend_name(),
            count = self.scenarios.len(),
            "scenarios persisted"
        );
        Ok(())
    }

    /// Discard the working set and reload from the store.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.scenarios = self.store.load()?;
        Ok(())
    }
}
