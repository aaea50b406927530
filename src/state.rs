//! Application State - loaded once, read-only afterwards
//!
//! The dataset is parsed at startup and shared by every request. Selections
//! are passed in per call, so there is no mutable state to guard.

use std::sync::Arc;

use crate::config::{Config, ViewConfig};
use crate::dataset::Dataset;
use crate::dimension::Dimension;
use crate::error::{DataSourceError, ScoreError};
use crate::view::{self, ViewModel};

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dataset: Arc<Dataset>,
}

impl AppState {
    /// Load the dataset named by `config`
    pub fn load(config: Config) -> Result<Self, DataSourceError> {
        let dataset = Dataset::load(&config.dataset, &config.columns)?;
        if dataset.is_empty() {
            tracing::warn!("Dataset {:?} has no rows", config.dataset.path);
        }
        Ok(Self::new(config, dataset))
    }

    pub fn new(config: Config, dataset: Dataset) -> Self {
        Self {
            config: Arc::new(config),
            dataset: Arc::new(dataset),
        }
    }

    /// Country names for the selector
    pub fn countries(&self) -> Vec<String> {
        self.dataset
            .distinct_countries()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Build a view model, falling back to configured view options
    pub fn view(
        &self,
        country: &str,
        dimension: Dimension,
        options: Option<ViewConfig>,
    ) -> Result<ViewModel, ScoreError> {
        view::build(
            &self.dataset,
            &self.config.palette,
            country,
            dimension,
            options.unwrap_or(self.config.view),
        )
    }
}
