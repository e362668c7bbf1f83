//! Numerical utilities shared by the pipeline and models.

pub mod metrics;
pub mod ols;

pub use metrics::{calculate_metrics, ForecastMetrics};
pub use ols::{ols_fit, OlsFit};
