//! Scenario management and persistence
//!
//! Scenarios are named parameter sets the user creates, edits, and
//! compares. Persistence goes through the `ScenarioStore` trait so the
//! backend (in-memory, sled, or an application database) stays swappable.

pub mod manager;
pub mod store;

pub use manager::{compare, ScenarioComparison, ScenarioManager};
pub use store::{InMemoryScenarioStore, ScenarioStore, SledScenarioStore, StoreError};
