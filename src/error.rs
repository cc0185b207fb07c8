//! Error types for console construction
//!
//! Runtime problems (unsupported characters, out-of-range coordinates) are
//! absorbed and logged where they happen. Only configuration problems found
//! while building a console are reported as errors.

use thiserror::Error;

use crate::app::ConfigError;

/// Console error type
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// The requested screen variant is not implemented
    #[error("Screen type '{0}' is not supported")]
    UnsupportedScreen(String),

    /// Configured dimensions lie outside the allowed ranges
    #[error("Invalid dimensions {rows}x{cols}: rows must be in {min_rows}..={max_rows}, cols in {min_cols}..={max_cols}")]
    InvalidDimensions {
        rows: usize,
        cols: usize,
        min_rows: usize,
        max_rows: usize,
        min_cols: usize,
        max_cols: usize,
    },

    /// Some other configuration value is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for console construction
pub type Result<T> = std::result::Result<T, ConsoleError>;
