//! Core data structures for the forecasting pipeline.

mod forecast;
mod sample;
mod series;

pub use forecast::{hourly_records, ForecastRecord};
pub use sample::{Pollutant, RawSample, NUM_POLLUTANTS};
pub use series::PollutantSeries;
