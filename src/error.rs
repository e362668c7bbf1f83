//! Error types for the aqi-forecast library.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, AqiError>;

/// Errors that can occur while building or running a forecast.
#[derive(Error, Debug)]
pub enum AqiError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Fewer samples available than the window arithmetic requires.
    #[error("insufficient history: need at least {needed} samples, got {got}")]
    InsufficientHistory { needed: usize, got: usize },

    /// A column with zero variance cannot be min-max scaled.
    #[error("zero-variance column '{column}': min equals max")]
    ZeroVariance { column: String },

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Computation error (e.g. numerical issues).
    #[error("computation error: {0}")]
    ComputationError(String),

    /// A model fit or predict call failed; no artifact is produced.
    #[error("forecast generation failed: {0}")]
    ForecastFailed(#[source] Box<AqiError>),

    /// Artifact or payload I/O failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Forecast artifact (de)serialization failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Payload or metrics (de)serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AqiError {
    /// Wrap a model-stage failure so callers see one typed condition.
    pub fn forecast_failed(self) -> Self {
        AqiError::ForecastFailed(Box::new(self))
    }
}
