//! Application state for the leave engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, PoisonError, RwLock};

use crate::config::{ConfigLoader, EngineSettings};
use crate::error::EngineResult;
use crate::models::CapacityPolicy;
use crate::store::{LeaveStore, SharedLeaveStore};

/// Shared application state.
///
/// Holds the working set and the settings loaded at startup. The capacity
/// policy can be replaced at runtime; the other settings are fixed.
#[derive(Clone)]
pub struct AppState {
    store: SharedLeaveStore,
    policy: Arc<RwLock<CapacityPolicy>>,
    settings: Arc<EngineSettings>,
}

impl AppState {
    /// Creates a new application state from loaded configuration and an
    /// initial store.
    pub fn new(config: ConfigLoader, store: LeaveStore) -> Self {
        let settings = *config.settings();
        Self {
            store: SharedLeaveStore::new(store),
            policy: Arc::new(RwLock::new(settings.capacity)),
            settings: Arc::new(settings),
        }
    }

    /// The shared working set.
    pub fn store(&self) -> &SharedLeaveStore {
        &self.store
    }

    /// Settings as loaded at startup.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// The capacity policy currently in force.
    pub fn policy(&self) -> CapacityPolicy {
        *self.policy.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validates and installs a new capacity policy.
    pub fn set_policy(&self, policy: CapacityPolicy) -> EngineResult<()> {
        policy.validate()?;
        *self.policy.write().unwrap_or_else(PoisonError::into_inner) = policy;
        Ok(())
    }
}
