//! Config validation: physical range checks
//!
//! Warnings never break a config — suspicious values are reported so the
//! caller can surface them, and the engine proceeds with whatever was
//! loaded.

use super::EngineConfig;

/// A non-fatal config warning (out-of-range or suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn warning(field: &str, message: String) -> ValidationWarning {
    ValidationWarning {
        field: field.to_string(),
        message,
    }
}

/// Range-check a loaded config, returning all findings.
pub fn validate(config: &EngineConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let sim = &config.simulation;
    if sim.realizations == 0 {
        warnings.push(warning(
            "simulation.realizations",
            "must be positive; runs will be rejected".to_string(),
        ));
    } else if sim.realizations > 100_000 {
        warnings.push(warning(
            "simulation.realizations",
            format!("{} is unusually large; expect long runs", sim.realizations),
        ));
    }
    if !(sim.min_success_fraction > 0.0 && sim.min_success_fraction <= 1.0) {
        warnings.push(warning(
            "simulation.min_success_fraction",
            format!(
                "{} is outside (0, 1]; failure tolerance is effectively disabled",
                sim.min_success_fraction
            ),
        ));
    }

    let anomaly = &config.anomaly;
    if anomaly.stride == 0 {
        warnings.push(warning(
            "anomaly.stride",
            "must be positive; the scanner clamps it to 1".to_string(),
        ));
    }
    if anomaly.skip_after_hit < 0.0 {
        warnings.push(warning(
            "anomaly.skip_after_hit",
            "negative skip distance re-flags the same zone".to_string(),
        ));
    }
    if anomaly.ramp_lag_samples == 0 {
        warnings.push(warning(
            "anomaly.ramp_lag_samples",
            "zero lag makes the ramp gradient undefined".to_string(),
        ));
    }

    if config.spatial.bin_step <= 0.0 {
        warnings.push(warning(
            "spatial.bin_step",
            "must be positive; the aggregator falls back to its default".to_string(),
        ));
    }

    warnings
}
