//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings from YAML and seed data from JSON.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::CapacityPolicy;

use super::types::{EngineSettings, SeedData};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── settings.yaml   # Capacity, report and leave settings
/// └── seed.json       # Optional initial working set
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Cap: {}%", loader.capacity().max_concurrent_percentage);
/// # Ok::<(), leave_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    settings: EngineSettings,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `settings.yaml` is missing, is not valid YAML, or
    /// carries a capacity percentage outside 0..=100.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let settings_path = path.as_ref().join("settings.yaml");
        let settings = Self::load_yaml::<EngineSettings>(&settings_path)?;
        Self::from_settings(settings)
    }

    /// Wraps already-built settings after validating them.
    pub fn from_settings(settings: EngineSettings) -> EngineResult<Self> {
        settings.capacity.validate()?;
        Ok(Self { settings })
    }

    /// Loads a seed working set from a JSON file.
    ///
    /// Dates in the file may be plain dates or timestamps.
    pub fn load_seed<P: AsRef<Path>>(path: P) -> EngineResult<SeedData> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the full settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the configured capacity policy.
    pub fn capacity(&self) -> CapacityPolicy {
        self.settings.capacity
    }
}
