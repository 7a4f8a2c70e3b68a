//! Application state for the benefits engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::models::BenefitsDataset;

/// Shared application state.
///
/// Holds the dataset snapshot the `GET /benefits` routes run against. The
/// snapshot is immutable for the lifetime of the server.
#[derive(Clone)]
pub struct AppState {
    dataset: Arc<BenefitsDataset>,
}

impl AppState {
    /// Creates a new application state around a dataset.
    pub fn new(dataset: BenefitsDataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }

    /// Creates the application state from a loaded configuration.
    pub fn from_config(config: ConfigLoader) -> Self {
        Self::new(config.into_dataset())
    }

    /// Returns the dataset snapshot.
    pub fn dataset(&self) -> &BenefitsDataset {
        &self.dataset
    }
}
