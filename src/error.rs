//! Error types for the facility catalog.

use thiserror::Error;

/// Errors raised by the catalog, its spatial index and configuration loading.
///
/// Absent records are not errors: lookups and deletions report them as
/// `false`, `None` or an empty `Vec`.
#[derive(Debug, Error)]
pub enum FacilityError {
    #[error("invalid coordinate (lat {latitude}, lon {longitude}): {reason}")]
    InvalidCoordinate {
        latitude: f64,
        longitude: f64,
        reason: String,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("spatial index invariant violated: {0}")]
    InvariantViolation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, FacilityError>;
