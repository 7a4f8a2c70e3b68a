//! Configuration loading for the benefits engine.
//!
//! This module loads a benefits dataset from a directory of YAML files:
//! dataset metadata, sectors, the roster, manual calendar entries and
//! monthly overrides.
//!
//! # Example
//!
//! ```no_run
//! use benefits_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/sample").unwrap();
//! println!("Loaded dataset: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BenefitsConfig, CalendarConfig, DatasetMetadata, EmployeesConfig, HolidayConfig,
    OverridesConfig, SectorsConfig,
};
