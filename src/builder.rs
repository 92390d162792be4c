//! Catalog builder for flexible configuration
//!
//! Settings can come from a [`Config`] value, a config file, or individual
//! setters; later calls override earlier ones.

use crate::catalog::FacilityCatalog;
use crate::config::Config;
use crate::error::Result;
use std::path::PathBuf;

/// Builder for [`FacilityCatalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    config: Config,
    config_file: Option<PathBuf>,
}

impl CatalogBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self.config_file = None;
        self
    }

    /// Load the configuration from a JSON (or, with the `toml` feature, TOML)
    /// file when the catalog is built. The file wins over every setter.
    pub fn config_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn node_capacity(mut self, capacity: usize) -> Self {
        self.config = self.config.with_node_capacity(capacity);
        self
    }

    pub fn min_node_fill(mut self, fill: usize) -> Self {
        self.config = self.config.with_min_node_fill(fill);
        self
    }

    pub fn split_internal_nodes(mut self, split: bool) -> Self {
        self.config = self.config.with_split_internal_nodes(split);
        self
    }

    pub fn truncate_results(mut self, truncate: bool) -> Self {
        self.config = self.config.with_truncate_results(truncate);
        self
    }

    /// Keep only the most recent `capacity` query log lines.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config = self.config.with_history_capacity(capacity);
        self
    }

    /// Build the catalog. Reads the config file if one was set, then
    /// validates the final configuration.
    pub fn build(self) -> Result<FacilityCatalog> {
        let config = match self.config_file {
            Some(path) => {
                log::debug!("loading catalog config from {}", path.display());
                Config::from_file(&path)?
            }
            None => self.config,
        };
        config.validate()?;

        log::debug!(
            "building catalog: node_capacity={}, min_node_fill={}, split_internal_nodes={}",
            config.node_capacity,
            config.min_node_fill,
            config.split_internal_nodes
        );
        FacilityCatalog::with_config(config)
    }
}
