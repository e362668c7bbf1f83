//! Parsing of the upstream air-pollution history payload.
//!
//! The history service responds with
//! `{"list": [{"dt": <epoch seconds>, "components": {"co": .., "nh3": ..}}]}`;
//! fetching it is the caller's concern, turning it into a validated
//! [`PollutantSeries`] happens here.

use chrono::DateTime;
use serde::Deserialize;

use crate::core::{PollutantSeries, RawSample};
use crate::error::{AqiError, Result};

#[derive(Debug, Deserialize)]
struct HistoryPayload {
    list: Vec<HistoryEntry>,
}

#[derive(Debug, Deserialize)]
struct HistoryEntry {
    dt: i64,
    components: Components,
}

/// Component fields the service may omit or null out; either way the
/// concentration is treated as missing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Components {
    co: Option<f64>,
    no: Option<f64>,
    no2: Option<f64>,
    o3: Option<f64>,
    so2: Option<f64>,
    pm2_5: Option<f64>,
    pm10: Option<f64>,
    nh3: Option<f64>,
}

impl HistoryEntry {
    fn into_sample(self) -> Result<RawSample> {
        let timestamp = DateTime::from_timestamp(self.dt, 0).ok_or_else(|| {
            AqiError::TimestampError(format!("epoch seconds {} out of range", self.dt))
        })?;

        let c = self.components;
        Ok(RawSample::with_concentrations(
            timestamp,
            [c.co, c.no, c.no2, c.o3, c.so2, c.pm2_5, c.pm10, c.nh3],
        ))
    }
}

/// Parse a history payload into raw samples, in payload order.
pub fn parse_history_json(text: &str) -> Result<Vec<RawSample>> {
    let payload: HistoryPayload = serde_json::from_str(text)?;
    payload
        .list
        .into_iter()
        .map(HistoryEntry::into_sample)
        .collect()
}

/// Parse a history payload straight into a validated series.
pub fn parse_history_series(text: &str) -> Result<PollutantSeries> {
    let samples = parse_history_json(text)?;
    PollutantSeries::from_samples(&samples)
}
