//! Forecast records, the durable output of a pipeline run.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One forecast hour: timestamp and predicted composite index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub timestamp: DateTime<Utc>,
    pub predicted_index: f64,
}

/// Attach contiguous hourly timestamps to predicted index values.
///
/// Record `i` is stamped `start + i` hours, so passing
/// `last_observed + 1h` as `start` yields the forward-looking artifact.
pub fn hourly_records(start: DateTime<Utc>, predictions: &[f64]) -> Vec<ForecastRecord> {
    predictions
        .iter()
        .enumerate()
        .map(|(i, &predicted_index)| ForecastRecord {
            timestamp: start + Duration::hours(i as i64),
            predicted_index,
        })
        .collect()
}
