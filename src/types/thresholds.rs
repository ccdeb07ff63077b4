//! Engine thresholds and defaults
//!
//! Constant modules grouped by subsystem. The `config` module exposes the
//! same values as operator-tunable TOML fields whose defaults match these
//! constants exactly.

/// Thresholds for anomaly scanning of pressure curves
pub mod anomaly_thresholds {
    // === Narrow Window (drillable margin) ===
    /// FG − PP margin below which a window flag is emitted (psi)
    pub const NARROW_WINDOW_PSI: f64 = 200.0;
    /// FG − PP margin below which the flag is critical (psi)
    pub const NARROW_WINDOW_CRITICAL_PSI: f64 = 100.0;

    // === Pressure Ramp ===
    /// Local PP gradient above which a ramp flag is emitted (psi/ft)
    pub const RAMP_GRADIENT_PSI_FT: f64 = 1.0;
    /// Sample lag over which the local gradient is measured
    pub const RAMP_LAG_SAMPLES: usize = 10;

    // === Scan control ===
    /// Depth distance skipped after a hit so one transition zone does not
    /// flood the flag list (depth units)
    pub const SKIP_AFTER_HIT: f64 = 200.0;
    /// Default sampling stride for interactive scans
    pub const DEFAULT_STRIDE: usize = 1;
}

/// Thresholds for portfolio risk classification
pub mod risk_thresholds {
    /// Minimum margin below which a well is High risk (psi).
    /// Comparison is strict `<`: a margin of exactly 200 classifies Medium.
    pub const HIGH_RISK_MARGIN_PSI: f64 = 200.0;
    /// Minimum margin below which a well is Medium risk (psi).
    /// Strict `<`: a margin of exactly 500 classifies Low.
    pub const MEDIUM_RISK_MARGIN_PSI: f64 = 500.0;

    // === Contingency costing ===
    /// Base contingency budget per well (USD)
    pub const BASE_CONTINGENCY_USD: f64 = 500_000.0;
    /// Added contingency for a High-risk well (USD)
    pub const HIGH_RISK_INCREMENT_USD: f64 = 1_500_000.0;
    /// Added contingency for a Medium-risk well (USD)
    pub const MEDIUM_RISK_INCREMENT_USD: f64 = 500_000.0;
}

/// Monte Carlo simulation defaults
pub mod simulation_defaults {
    /// Default realization count
    pub const REALIZATIONS: usize = 500;
    /// Minimum fraction of realizations that must succeed for the run to
    /// be usable
    pub const MIN_SUCCESS_FRACTION: f64 = 0.5;
    /// Bounded retries when resampling a negative draw for a physically
    /// non-negative parameter, before clamping to zero
    pub const RESAMPLE_RETRIES: usize = 8;
}

/// Spatial aggregation defaults
pub mod spatial_defaults {
    /// Common depth axis bin step (ft)
    pub const BIN_STEP: f64 = 50.0;
    /// Minimum qualifying wells for a planar trend fit
    pub const MIN_WELLS_FOR_TREND: usize = 3;
}

/// Reference fluid gradients for the centroid correction
pub mod fluid_gradients {
    /// Gas column gradient (psi/ft)
    pub const GAS_PSI_FT: f64 = 0.1;
    /// Oil column gradient (psi/ft)
    pub const OIL_PSI_FT: f64 = 0.35;
    /// Brine column gradient (psi/ft)
    pub const BRINE_PSI_FT: f64 = 0.465;
}
