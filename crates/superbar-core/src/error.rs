//! Configuration errors.

use thiserror::Error;

/// Errors raised while configuring a bar.
///
/// Value computation never fails; only configuration can be rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid range: min ({min}) must be finite and less than max ({max})")]
    InvalidRange { min: f64, max: f64 },
    #[error("Invalid interval: {0} is not a finite number")]
    InvalidInterval(f64),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
