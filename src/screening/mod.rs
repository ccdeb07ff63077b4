//! Curve screening: anomaly signatures and physical plausibility
//!
//! Both scanners are purely observational — they read curves and emit
//! flags, never mutating inputs. Flags feed the UI layer directly.
//!
//! - `anomaly`: narrow drillable windows and rapid pore-pressure ramps
//! - `plausibility`: PP/FG/OBG ordering violations by severity

pub mod anomaly;
pub mod plausibility;

pub use anomaly::{scan, AnomalyScanOptions};
pub use plausibility::check;
