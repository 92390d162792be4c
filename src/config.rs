//! Configuration for the facility catalog and its spatial index.
//!
//! All fields have defaults, so a partial JSON/TOML document is enough:
//!
//! ```rust
//! use geofacility::Config;
//!
//! let config = Config::from_json(r#"{ "node_capacity": 8 }"#)?;
//! assert_eq!(config.node_capacity, 8);
//! assert_eq!(config.min_node_fill, 2);
//! # Ok::<(), geofacility::FacilityError>(())
//! ```

use crate::error::{FacilityError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const LARGE_HISTORY_CAPACITY: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum children per node before it splits
    #[serde(default = "Config::default_node_capacity")]
    pub node_capacity: usize,

    /// A non-root node left with fewer children than this after a delete is
    /// evicted from its parent and its remaining facilities reinserted
    #[serde(default = "Config::default_min_node_fill")]
    pub min_node_fill: usize,

    /// Split internal nodes on overflow as well as leaves.
    ///
    /// The classic form of this index never splits internal nodes: they absorb
    /// split siblings without bound and the tree never grows past two levels.
    /// That is what `false` gives you. The default departs from it and keeps
    /// every node within `node_capacity`, so the tree grows in height instead.
    #[serde(default = "Config::default_split_internal_nodes")]
    pub split_internal_nodes: bool,

    /// Cap nearest-neighbour results at the requested `max_results`.
    ///
    /// The classic form of this index ignores `max_results` and returns every
    /// record in range; set `false` for that behaviour.
    #[serde(default = "Config::default_truncate_results")]
    pub truncate_results: bool,

    /// Number of query log lines to retain (None keeps everything)
    #[serde(default)]
    pub history_capacity: Option<usize>,
}

impl Config {
    const fn default_node_capacity() -> usize {
        4
    }

    const fn default_min_node_fill() -> usize {
        2
    }

    const fn default_split_internal_nodes() -> bool {
        true
    }

    const fn default_truncate_results() -> bool {
        true
    }

    pub fn with_node_capacity(mut self, capacity: usize) -> Self {
        self.node_capacity = capacity;
        self
    }

    pub fn with_min_node_fill(mut self, fill: usize) -> Self {
        self.min_node_fill = fill;
        self
    }

    pub fn with_split_internal_nodes(mut self, split: bool) -> Self {
        self.split_internal_nodes = split;
        self
    }

    pub fn with_truncate_results(mut self, truncate: bool) -> Self {
        self.truncate_results = truncate;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        if capacity > LARGE_HISTORY_CAPACITY {
            log::warn!(
                "History capacity of {} is very large; every logged query keeps its full text.",
                capacity
            );
        }
        self.history_capacity = Some(capacity);
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.node_capacity < 2 {
            return Err(FacilityError::InvalidConfig(format!(
                "node_capacity must be at least 2, got {}",
                self.node_capacity
            )));
        }

        if self.min_node_fill == 0 {
            return Err(FacilityError::InvalidConfig(
                "min_node_fill must be greater than zero".to_string(),
            ));
        }

        // an overflowing node of capacity + 1 children splits into halves of
        // (capacity + 1) / 2 and the rest; both must satisfy the fill
        if self.min_node_fill > (self.node_capacity + 1) / 2 {
            return Err(FacilityError::InvalidConfig(format!(
                "min_node_fill ({}) must not exceed half of node_capacity + 1 ({})",
                self.min_node_fill,
                (self.node_capacity + 1) / 2
            )));
        }

        if self.history_capacity == Some(0) {
            return Err(FacilityError::InvalidConfig(
                "history_capacity must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a file. `.toml` files need the `toml` feature;
    /// anything else is parsed as JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Self::from_toml_file_contents(path, &contents)
        } else {
            Self::from_json(&contents)
        }
    }

    #[cfg(feature = "toml")]
    fn from_toml_file_contents(_path: &Path, contents: &str) -> Result<Self> {
        Self::from_toml(contents)
    }

    #[cfg(not(feature = "toml"))]
    fn from_toml_file_contents(path: &Path, _contents: &str) -> Result<Self> {
        Err(FacilityError::InvalidConfig(format!(
            "{} is a TOML file but the `toml` feature is disabled",
            path.display()
        )))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_capacity: Self::default_node_capacity(),
            min_node_fill: Self::default_min_node_fill(),
            split_internal_nodes: Self::default_split_internal_nodes(),
            truncate_results: Self::default_truncate_results(),
            history_capacity: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.node_capacity, 4);
        assert_eq!(config.min_node_fill, 2);
        assert!(config.split_internal_nodes);
        assert!(config.truncate_results);
        assert_eq!(config.history_capacity, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip_and_partial() {
        let config = Config::default()
            .with_node_capacity(6)
            .with_history_capacity(10);
        let json = config.to_json().unwrap();
        assert_eq!(Config::from_json(&json).unwrap(), config);

        let partial = Config::from_json(r#"{"truncate_results": false}"#).unwrap();
        assert!(!partial.truncate_results);
        assert_eq!(partial.node_capacity, 4);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = Config::from_json(r#"{"node_capacty": 4}"#).unwrap_err();
        assert!(matches!(err, FacilityError::Json(_)));
    }

    #[test]
    fn test_validation_failures() {
        let cases = [
            Config::default().with_node_capacity(1),
            Config::default().with_min_node_fill(0),
            Config::default().with_min_node_fill(3),
            Config::default().with_history_capacity(0),
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(FacilityError::InvalidConfig(_))),
                "{config:?} should be rejected"
            );
        }

        // capacity 5 splits 6 children into 3 + 3
        assert!(
            Config::default()
                .with_node_capacity(5)
                .with_min_node_fill(3)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_from_json_validates() {
        let err = Config::from_json(r#"{"node_capacity": 1}"#).unwrap_err();
        assert!(matches!(err, FacilityError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_file_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"node_capacity": 10, "history_capacity": 50}}"#).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.node_capacity, 10);
        assert_eq!(config.history_capacity, Some(50));
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, FacilityError::Io(_)));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default().with_split_internal_nodes(false);
        let text = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "node_capacity = 8\nmin_node_fill = 3\n").unwrap();
        let loaded = Config::from_file(file.path()).unwrap();
        assert_eq!(loaded.node_capacity, 8);
        assert_eq!(loaded.min_node_fill, 3);
    }

    #[cfg(not(feature = "toml"))]
    #[test]
    fn test_toml_file_without_feature() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, FacilityError::InvalidConfig(_)));
    }
}
