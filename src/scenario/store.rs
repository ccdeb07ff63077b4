//! ScenarioStore trait — pluggable scenario persistence
//!
//! Abstracts scenario list persistence so backends can be swapped without
//! touching engine code:
//! - `InMemoryScenarioStore`: in-memory store for tests and minimal
//!   deployments
//! - `SledScenarioStore`: embedded sled database for durable local storage
//!
//! The store is the engine's only suspension point; the numerical core
//! stays synchronous and deterministic behind this boundary.

use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::types::Scenario;

/// Scenario persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Trait for pluggable scenario persistence backends.
///
/// Implementations must be thread-safe (Send + Sync) for shared access
/// from UI and background callers. `save` replaces the full list; the
/// scenario set is small and the whole-list contract keeps backends
/// trivial.
pub trait ScenarioStore: Send + Sync {
    /// Persist the full scenario list, replacing any previous contents.
    fn save(&self, scenarios: &[Scenario]) -> Result<(), StoreError>;

    /// Retrieve all persisted scenarios.
    fn load(&self) -> Result<Vec<Scenario>, StoreError>;

    /// Backend name for logging.
    fn backend_name(&self) -> &'static str;
}

// ============================================================================
// In-memory store
// ============================================================================

/// In-memory persistence for tests and minimal deployments.
///
/// Thread-safe via `RwLock`. Not durable; contents are lost on drop.
#[derive(Default)]
pub struct InMemoryScenarioStore {
    scenarios: std::sync::RwLock<Vec<Scenario>>,
}

impl InMemoryScenarioStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScenarioStore for InMemoryScenarioStore {
    fn save(&self, scenarios: &[Scenario]) -> Result<(), StoreError> {
        let mut store = self
            .scenarios
            .write()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        *store = scenarios.to_vec();
        Ok(())
    }

    fn load(&self) -> Result<Vec<Scenario>, StoreError> {
        let store = self
            .scenarios
            .read()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(store.clone())
    }

    fn backend_name(&self) -> &'static str {
        "in-memory"
    }
}

// ============================================================================
// Sled-backed store
// ============================================================================

/// Durable scenario storage on an embedded sled database.
///
/// Key: scenario id as bytes. Value: JSON-serialized `Scenario`. Writes
/// flush eagerly: scenario edits are rare and losing one to a crash would
/// surprise the user.
#[derive(Clone)]
pub struct SledScenarioStore {
    db: Arc<sled::Db>,
}

impl SledScenarioStore {
    /// Open or create the store at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self { db: Arc::new(db) })
    }
}

impl ScenarioStore for SledScenarioStore {
    fn save(&self, scenarios: &[Scenario]) -> Result<(), StoreError> {
        self.db.clear()?;
        for scenario in scenarios {
            let key = scenario.id.as_bytes().to_vec();
            let value = serde_json::to_vec(scenario)?;
            self.db.insert(key, value)?;
        }
        self.db.flush()?;
        Ok(())
    }

    fn load(&self) -> Result<Vec<Scenario>, StoreError> {
        let mut scenarios = Vec::new();
        for item in self.db.iter() {
            let (_key, value) = item?;
            let scenario: Scenario = serde_json::from_slice(&value)?;
            scenarios.push(scenario);
        }
        // Sled iterates in key (id-byte) order; present oldest first the
        // way users created them.
        scenarios.sort_by_key(|s| s.created_at);
        Ok(scenarios)
    }

    fn backend_name(&self) -> &'static str {
        "sled"
    }
}
