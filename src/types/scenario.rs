//! Named parameter scenarios
//!
//! Scenarios are the only long-lived mutable entities in the engine. They
//! are edited exclusively through explicit setters; a simulation run reads
//! a clone of the parameter set, never the scenario itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::params::ParameterSet;

/// A named, persistable geomechanical parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub parameters: ParameterSet,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Scenario {
    /// Create a scenario with a fresh id and matching timestamps.
    pub fn new(name: &str, parameters: ParameterSet, description: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.to_string(),
            parameters,
            created_at: now,
            modified_at: now,
        }
    }

    /// Replace the parameter set, bumping the modification timestamp.
    ///
    /// This is the only sanctioned mutation path; simulation code receives
    /// clones via `snapshot()`.
    pub fn set_parameters(&mut self, parameters: ParameterSet) {
        self.parameters = parameters;
        self.modified_at = Utc::now();
    }

    /// Copy of the parameter set for a simulation run.
    pub fn snapshot(&self) -> ParameterSet {
        self.parameters.clone()
    }
}
