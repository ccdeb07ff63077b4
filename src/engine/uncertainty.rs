//! Uncertainty Quantifier
//!
//! Converts a concrete parameter set plus relative uncertainty settings
//! into per-parameter sampling distributions. Pure function of its inputs;
//! the resulting `UncertainParameterSet` lives for one simulation run.

use serde::{Deserialize, Serialize};

use crate::types::{ParameterName, ParameterSet, UncertainParameter, UncertaintySettings};

/// Per-parameter distributions for one Monte Carlo run, in the fixed
/// `ParameterSet::entries()` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncertainParameterSet {
    entries: Vec<(ParameterName, UncertainParameter)>,
}

impl UncertainParameterSet {
    pub fn entries(&self) -> &[(ParameterName, UncertainParameter)] {
        &self.entries
    }

    /// Distribution for a single parameter.
    pub fn get(&self, name: ParameterName) -> Option<UncertainParameter> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, p)| *p)
    }
}

/// Derive sampling distributions from base parameters and category
/// uncertainty fractions.
///
/// `std_dev = |mean| * fraction` for the parameter's category. A parameter
/// with a zero mean carries no uncertainty (`std_dev == 0`) — a null term
/// stays null rather than turning into a divide-by-zero or a negative
/// spread.
pub fn quantify(
    base: &ParameterSet,
    settings: &UncertaintySettings,
) -> UncertainParameterSet {
    let entries = base
        .entries()
        .iter()
        .map(|&(name, mean)| {
            let fraction = settings.fraction_for(name.category());
            let std_dev = if mean == 0.0 {
                0.0
            } else {
                mean.abs() * fraction.max(0.0)
            };
            (name, UncertainParameter { mean, std_dev })
        })
        .collect();
    UncertainParameterSet { entries }
}
