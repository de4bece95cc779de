//! Error types for the forecast_engine crate

use forecast_math::MathError;
use thiserror::Error;

/// Custom error types for the forecast_engine crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to input records
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error loading configuration
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Error from the numeric primitives
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error decoding JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error decoding TOML
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
