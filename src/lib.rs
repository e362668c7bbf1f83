//! # aqi-forecast
//!
//! Hourly air-quality index forecasting for a single location.
//!
//! Ingests a multi-pollutant concentration history, derives a composite
//! air-quality index per sample, and produces a multi-day hour-resolution
//! forecast with held-out accuracy metrics. The regressor is pluggable:
//! anything implementing [`models::SequenceRegressor`] over the fixed
//! (window, horizon) shape contract slots into the pipeline unchanged.
//!
//! ```no_run
//! use aqi_forecast::prelude::*;
//!
//! # fn main() -> aqi_forecast::Result<()> {
//! let payload = std::fs::read_to_string("history.json")?;
//! let series = aqi_forecast::ingest::parse_history_series(&payload)?;
//!
//! let pipeline = ForecastPipeline::new(PipelineConfig::default());
//! let mut model = LastRowLinear::new();
//! let outcome = pipeline.run(&series, &mut model)?;
//!
//! println!("rmse {:.2}, mae {:.2}", outcome.metrics.rmse, outcome.metrics.mae);
//! # Ok(())
//! # }
//! ```

pub mod aqi;
pub mod artifact;
pub mod core;
pub mod dataset;
pub mod error;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod transform;
pub mod utils;

pub use error::{AqiError, Result};

pub mod prelude {
    pub use crate::core::{ForecastRecord, Pollutant, PollutantSeries, RawSample};
    pub use crate::error::{AqiError, Result};
    pub use crate::models::baseline::{HorizonMean, LastRowLinear};
    pub use crate::models::{BoxedRegressor, SequenceRegressor};
    pub use crate::pipeline::{ForecastPipeline, PipelineConfig, PipelineOutcome};
    pub use crate::utils::ForecastMetrics;
}
