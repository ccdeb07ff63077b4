//! Engine Configuration Module
//!
//! Run tuning loaded from TOML, with built-in defaults matching the
//! constants in `types::thresholds`. There is no global config state —
//! callers load an `EngineConfig` and derive per-component option structs
//! from it, keeping the numerical core free of hidden state.

mod engine_config;
pub mod validation;

pub use engine_config::*;
pub use validation::{validate, ValidationWarning};
