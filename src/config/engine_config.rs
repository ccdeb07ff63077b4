//! Engine configuration: run tuning as operator-editable TOML values
//!
//! Every struct implements `Default` with values matching the constants in
//! `types::thresholds`, so an absent or partial config file changes
//! nothing. The engine deliberately has no global config state: load a
//! config, derive option structs from it, and pass those to the
//! components.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::engine::SimulationOptions;
use crate::screening::AnomalyScanOptions;
use crate::types::{anomaly_thresholds, simulation_defaults, spatial_defaults};

/// Config loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for an engine deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    /// Monte Carlo run tuning
    #[serde(default)]
    pub simulation: SimulationTuning,

    /// Anomaly scan controls
    #[serde(default)]
    pub anomaly: AnomalyTuning,

    /// Spatial aggregation controls
    #[serde(default)]
    pub spatial: SpatialTuning,
}

impl EngineConfig {
    /// Load from a TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Parse from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Simulation options for the Monte Carlo driver. The seed stays a
    /// per-run argument, not a config value.
    pub fn simulation_options(&self, seed: Option<u64>) -> SimulationOptions {
        SimulationOptions {
            realizations: self.simulation.realizations,
            seed,
            min_success_fraction: self.simulation.min_success_fraction,
        }
    }

    /// Scan options for the anomaly detector.
    pub fn anomaly_options(&self) -> AnomalyScanOptions {
        AnomalyScanOptions {
            stride: self.anomaly.stride,
            skip_after_hit: self.anomaly.skip_after_hit,
            ramp_lag: self.anomaly.ramp_lag_samples,
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

/// `[simulation]` — Monte Carlo run tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationTuning {
    /// Realization count per run
    #[serde(default = "default_realizations")]
    pub realizations: usize,
    /// Minimum fraction of realizations that must succeed
    #[serde(default = "default_min_success_fraction")]
    pub min_success_fraction: f64,
}

fn default_realizations() -> usize {
    simulation_defaults::REALIZATIONS
}

fn default_min_success_fraction() -> f64 {
    simulation_defaults::MIN_SUCCESS_FRACTION
}

impl Default for SimulationTuning {
    fn default() -> Self {
        Self {
            realizations: default_realizations(),
            min_success_fraction: default_min_success_fraction(),
        }
    }
}

/// `[anomaly]` — scan performance and flood controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyTuning {
    /// Sample stride (1 = every sample)
    #[serde(default = "default_stride")]
    pub stride: usize,
    /// Depth distance skipped after a hit (depth units)
    #[serde(default = "default_skip_after_hit")]
    pub skip_after_hit: f64,
    /// Sample lag for the ramp gradient estimate
    #[serde(default = "default_ramp_lag")]
    pub ramp_lag_samples: usize,
}

fn default_stride() -> usize {
    anomaly_thresholds::DEFAULT_STRIDE
}

fn default_skip_after_hit() -> f64 {
    anomaly_thresholds::SKIP_AFTER_HIT
}

fn default_ramp_lag() -> usize {
    anomaly_thresholds::RAMP_LAG_SAMPLES
}

impl Default for AnomalyTuning {
    fn default() -> Self {
        Self {
            stride: default_stride(),
            skip_after_hit: default_skip_after_hit(),
            ramp_lag_samples: default_ramp_lag(),
        }
    }
}

/// `[spatial]` — cross-well binning controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialTuning {
    /// Common depth axis bin step (ft)
    #[serde(default = "default_bin_step")]
    pub bin_step: f64,
}

fn default_bin_step() -> f64 {
    spatial_defaults::BIN_STEP
}

impl Default for SpatialTuning {
    fn default() -> Self {
        Self {
            bin_step: default_bin_step(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(
            config.simulation.realizations,
            simulation_defaults::REALIZATIONS
        );
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [simulation]
            realizations = 1000
            "#,
        )
        .unwrap();
        assert_eq!(config.simulation.realizations, 1000);
        assert_eq!(
            config.simulation.min_success_fraction,
            simulation_defaults::MIN_SUCCESS_FRACTION
        );
        assert_eq!(config.anomaly.stride, anomaly_thresholds::DEFAULT_STRIDE);
    }

    #[test]
    fn toml_round_trip() {
        let mut config = EngineConfig::default();
        config.simulation.realizations = 250;
        config.anomaly.stride = 4;
        let text = toml::to_string(&config).unwrap();
        let parsed = EngineConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn options_carry_config_values() {
        let config = EngineConfig::from_toml_str(
            r#"
            [simulation]
            realizations = 64
            [anomaly]
            stride = 3
            "#,
        )
        .unwrap();
        let sim = config.simulation_options(Some(7));
        assert_eq!(sim.realizations, 64);
        assert_eq!(sim.seed, Some(7));
        let scan = config.anomaly_options();
        assert_eq!(scan.stride, 3);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = EngineConfig::from_toml_str("simulation = 3");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
