//! Geomechanical parameter sets and their uncertainty envelopes
//!
//! The deterministic gradient model consumes a `ParameterSet` — a typed
//! struct with named fields and explicit defaults rather than a loose
//! key-value map, so a missing parameter is a compile error instead of a
//! silent fall-through.

use serde::{Deserialize, Serialize};

/// Default relative uncertainty applied to a parameter whose category has
/// no explicit setting (fraction of the mean).
pub const DEFAULT_UNCERTAINTY_FRACTION: f64 = 0.10;

// ============================================================================
// Parameter identity
// ============================================================================

/// Every geomechanical parameter the gradient model accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterName {
    /// Eaton method exponent (dimensionless)
    EatonExponent,
    /// Normal compaction trend intercept (us/ft at surface)
    NctIntercept,
    /// Normal compaction trend decay slope (1/ft)
    NctSlope,
    /// Overburden gradient (psi/ft)
    OverburdenGradient,
    /// Normal (hydrostatic) pressure gradient (psi/ft)
    NormalGradient,
    /// Sonic matrix travel time (us/ft)
    DtMatrix,
    /// Sonic fluid travel time (us/ft)
    DtFluid,
}

/// Which uncertainty setting governs a parameter's spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UncertaintyCategory {
    /// Empirical model coefficients (Eaton exponent, gradients)
    ModelVariance,
    /// Compaction trend fit residuals (NCT intercept/slope)
    TrendResiduals,
    /// Measured log constants (sonic matrix/fluid travel times)
    LogNoise,
}

impl ParameterName {
    /// Uncertainty category for this parameter.
    pub fn category(self) -> UncertaintyCategory {
        match self {
            Self::EatonExponent | Self::OverburdenGradient | Self::NormalGradient => {
                UncertaintyCategory::ModelVariance
            }
            Self::NctIntercept | Self::NctSlope => UncertaintyCategory::TrendResiduals,
            Self::DtMatrix | Self::DtFluid => UncertaintyCategory::LogNoise,
        }
    }

    /// Whether negative values are physically meaningless for this
    /// parameter. Sampling resamples (then clamps) negative draws.
    pub fn is_non_negative(self) -> bool {
        // All current parameters are physically non-negative quantities.
        true
    }
}

impl std::fmt::Display for ParameterName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::EatonExponent => "eaton_exponent",
            Self::NctIntercept => "nct_intercept",
            Self::NctSlope => "nct_slope",
            Self::OverburdenGradient => "overburden_gradient",
            Self::NormalGradient => "normal_gradient",
            Self::DtMatrix => "dt_matrix",
            Self::DtFluid => "dt_fluid",
        };
        write!(f, "{name}")
    }
}

// ============================================================================
// ParameterSet
// ============================================================================

/// Concrete geomechanical parameter values for one gradient evaluation.
///
/// Owned by a `Scenario`; simulation runs operate on a clone so an editing
/// user can never mutate an in-flight run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub eaton_exponent: f64,
    pub nct_intercept: f64,
    pub nct_slope: f64,
    pub overburden_gradient: f64,
    pub normal_gradient: f64,
    pub dt_matrix: f64,
    pub dt_fluid: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            eaton_exponent: 1.0,
            // Typical Gulf-coast style sonic NCT: dt_n(z) = intercept * exp(-slope * z)
            nct_intercept: 180.0,
            nct_slope: 0.0002,
            overburden_gradient: 1.0,
            // 8.95 ppg seawater-equivalent hydrostatic
            normal_gradient: 0.465,
            dt_matrix: 55.0,
            dt_fluid: 189.0,
        }
    }
}

impl ParameterSet {
    /// Iterate parameters in a fixed, documented order.
    ///
    /// The Monte Carlo driver relies on this order being stable: draws are
    /// consumed parameter-by-parameter, so reordering would change seeded
    /// results.
    pub fn entries(&self) -> [(ParameterName, f64); 7] {
        [
            (ParameterName::EatonExponent, self.eaton_exponent),
            (ParameterName::NctIntercept, self.nct_intercept),
            (ParameterName::NctSlope, self.nct_slope),
            (ParameterName::OverburdenGradient, self.overburden_gradient),
            (ParameterName::NormalGradient, self.normal_gradient),
            (ParameterName::DtMatrix, self.dt_matrix),
            (ParameterName::DtFluid, self.dt_fluid),
        ]
    }

    /// Value accessor by name.
    pub fn get(&self, name: ParameterName) -> f64 {
        match name {
            ParameterName::EatonExponent => self.eaton_exponent,
            ParameterName::NctIntercept => self.nct_intercept,
            ParameterName::NctSlope => self.nct_slope,
            ParameterName::OverburdenGradient => self.overburden_gradient,
            ParameterName::NormalGradient => self.normal_gradient,
            ParameterName::DtMatrix => self.dt_matrix,
            ParameterName::DtFluid => self.dt_fluid,
        }
    }

    /// Setter by name, used when assembling a sampled realization.
    pub fn set(&mut self, name: ParameterName, value: f64) {
        match name {
            ParameterName::EatonExponent => self.eaton_exponent = value,
            ParameterName::NctIntercept => self.nct_intercept = value,
            ParameterName::NctSlope => self.nct_slope = value,
            ParameterName::OverburdenGradient => self.overburden_gradient = value,
            ParameterName::NormalGradient => self.normal_gradient = value,
            ParameterName::DtMatrix => self.dt_matrix = value,
            ParameterName::DtFluid => self.dt_fluid = value,
        }
    }
}

// ============================================================================
// Uncertainty settings
// ============================================================================

/// Relative uncertainty fractions per parameter category.
///
/// A fraction of 0.10 means one standard deviation is 10% of the mean.
/// Unset categories fall back to `DEFAULT_UNCERTAINTY_FRACTION`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UncertaintySettings {
    /// Spread on empirical model coefficients
    #[serde(default)]
    pub model_variance: Option<f64>,
    /// Spread on compaction trend residuals
    #[serde(default)]
    pub trend_residuals: Option<f64>,
    /// Spread on measured log constants
    #[serde(default)]
    pub log_noise: Option<f64>,
}

impl Default for UncertaintySettings {
    fn default() -> Self {
        Self {
            model_variance: None,
            trend_residuals: None,
            log_noise: None,
        }
    }
}

impl UncertaintySettings {
    /// Uniform fraction across all categories.
    pub fn uniform(fraction: f64) -> Self {
        Self {
            model_variance: Some(fraction),
            trend_residuals: Some(fraction),
            log_noise: Some(fraction),
        }
    }

    /// Resolve the fraction for a category, applying the default when unset.
    pub fn fraction_for(&self, category: UncertaintyCategory) -> f64 {
        let explicit = match category {
            UncertaintyCategory::ModelVariance => self.model_variance,
            UncertaintyCategory::TrendResiduals => self.trend_residuals,
            UncertaintyCategory::LogNoise => self.log_noise,
        };
        explicit.unwrap_or(DEFAULT_UNCERTAINTY_FRACTION)
    }
}

/// A single parameter's sampling distribution, derived per run and
/// discarded afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UncertainParameter {
    pub mean: f64,
    pub std_dev: f64,
}
