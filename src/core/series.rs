//! Validated pollutant concentration history.

use chrono::{DateTime, Duration, Utc};

use crate::core::sample::{Pollutant, RawSample, NUM_POLLUTANTS};
use crate::error::{AqiError, Result};

/// An hourly multi-pollutant concentration history for one location.
///
/// Values are stored column-major, one column per [`Pollutant`], with NaN
/// marking concentrations the upstream service did not report. Timestamps
/// are validated to be strictly increasing at construction.
#[derive(Debug, Clone)]
pub struct PollutantSeries {
    timestamps: Vec<DateTime<Utc>>,
    columns: Vec<Vec<f64>>,
}

impl PollutantSeries {
    /// Build a series from raw samples, validating timestamp order.
    pub fn from_samples(samples: &[RawSample]) -> Result<Self> {
        let timestamps: Vec<DateTime<Utc>> = samples.iter().map(|s| s.timestamp).collect();

        let mut columns = vec![Vec::with_capacity(samples.len()); NUM_POLLUTANTS];
        for sample in samples {
            for pollutant in Pollutant::ALL {
                let value = sample.concentration(pollutant).unwrap_or(f64::NAN);
                columns[pollutant.column()].push(value);
            }
        }

        Self::new(timestamps, columns)
    }

    /// Build a series from timestamps and column-major values.
    pub fn new(timestamps: Vec<DateTime<Utc>>, columns: Vec<Vec<f64>>) -> Result<Self> {
        for pair in timestamps.windows(2) {
            if pair[1] <= pair[0] {
                return Err(AqiError::TimestampError(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }

        if columns.len() != NUM_POLLUTANTS {
            return Err(AqiError::DimensionMismatch {
                expected: NUM_POLLUTANTS,
                got: columns.len(),
            });
        }
        for column in &columns {
            if column.len() != timestamps.len() {
                return Err(AqiError::DimensionMismatch {
                    expected: timestamps.len(),
                    got: column.len(),
                });
            }
        }

        Ok(Self { timestamps, columns })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Sample timestamps, strictly increasing.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Timestamp of the most recent sample.
    pub fn last_timestamp(&self) -> Result<DateTime<Utc>> {
        self.timestamps.last().copied().ok_or(AqiError::EmptyData)
    }

    /// Concentration column for one pollutant.
    pub fn column(&self, pollutant: Pollutant) -> &[f64] {
        &self.columns[pollutant.column()]
    }

    /// All concentrations at one sample, in feature-column order.
    pub fn row(&self, index: usize) -> [f64; NUM_POLLUTANTS] {
        let mut row = [f64::NAN; NUM_POLLUTANTS];
        for (column, slot) in self.columns.iter().zip(row.iter_mut()) {
            *slot = column[index];
        }
        row
    }

    /// Row-major copy of the feature matrix, aligned with `timestamps()`.
    pub fn feature_rows(&self) -> Vec<Vec<f64>> {
        (0..self.len()).map(|i| self.row(i).to_vec()).collect()
    }

    /// Whether any concentration is missing (NaN) or non-finite.
    pub fn has_missing_values(&self) -> bool {
        self.columns
            .iter()
            .any(|column| column.iter().any(|v| !v.is_finite()))
    }

    /// Keep only the samples at the given (sorted, deduplicated) indices.
    pub fn retain_indices(&self, keep: &[usize]) -> Result<Self> {
        let timestamps: Vec<DateTime<Utc>> = keep.iter().map(|&i| self.timestamps[i]).collect();
        let columns: Vec<Vec<f64>> = self
            .columns
            .iter()
            .map(|column| keep.iter().map(|&i| column[i]).collect())
            .collect();
        Self::new(timestamps, columns)
    }

    /// Return a copy with missing values filled by linear interpolation.
    ///
    /// Interior NaN runs are interpolated between their finite neighbors;
    /// leading and trailing runs are filled with the nearest finite value.
    pub fn interpolated(&self) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|column| interpolate_column(column))
            .collect();
        Self {
            timestamps: self.timestamps.clone(),
            columns,
        }
    }

    /// Indices `i` where the step from sample `i` to `i+1` is not one hour.
    pub fn hourly_gaps(&self) -> Vec<usize> {
        self.timestamps
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[1] - pair[0] != Duration::hours(1))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Linear interpolation over NaN runs, with edge fill.
fn interpolate_column(values: &[f64]) -> Vec<f64> {
    let mut result = values.to_vec();
    let n = result.len();

    let mut i = 0;
    while i < n {
        if result[i].is_finite() {
            i += 1;
            continue;
        }

        let start = i;
        while i < n && !result[i].is_finite() {
            i += 1;
        }
        let end = i;

        let left = if start > 0 { Some(result[start - 1]) } else { None };
        let right = if end < n { Some(result[end]) } else { None };

        match (left, right) {
            (Some(l), Some(r)) => {
                let segments = (end - start + 1) as f64;
                for (j, idx) in (start..end).enumerate() {
                    let t = (j + 1) as f64 / segments;
                    result[idx] = l + t * (r - l);
                }
            }
            (Some(l), None) => result[start..end].fill(l),
            (None, Some(r)) => result[start..end].fill(r),
            // All-NaN column stays as-is; the scaler rejects it later.
            (None, None) => {}
        }
    }

    result
}
