//! Configuration loading and management for the leave engine.
//!
//! Settings live in a YAML file inside a configuration directory; an
//! optional JSON seed file provides an initial working set.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Threshold for 10 people: {}", config.capacity().threshold(10));
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_ANNUAL_ALLOWANCE_DAYS, EngineSettings, LeaveSettings, ReportSettings, SeedData,
};
