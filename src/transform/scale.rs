//! Reversible min-max scaling for feature and target columns.

use crate::core::{Pollutant, PollutantSeries, NUM_POLLUTANTS};
use crate::error::{AqiError, Result};

/// Min-max scaler fitted on one column, mapping it into [0, 1].
///
/// The fitted (min, max) pair belongs to a single pipeline run: the same
/// state that scaled the training inputs must de-scale predictions and
/// test targets.
#[derive(Debug, Clone)]
pub struct MinMaxScaler {
    min: f64,
    max: f64,
}

impl MinMaxScaler {
    /// Fit on all historical values of a column.
    ///
    /// Fails on empty or non-finite input, and on a zero-variance column
    /// (max == min), which would make the transform non-invertible.
    pub fn fit(column: &str, values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(AqiError::EmptyData);
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(AqiError::ComputationError(format!(
                "column '{column}' contains non-finite values"
            )));
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if max == min {
            return Err(AqiError::ZeroVariance {
                column: column.to_string(),
            });
        }

        Ok(Self { min, max })
    }

    /// Scale one value into [0, 1] (for in-domain values).
    pub fn transform(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }

    /// Scale a slice of values.
    pub fn transform_slice(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.transform(v)).collect()
    }

    /// Map a scaled value back to original units.
    pub fn inverse(&self, scaled: f64) -> f64 {
        scaled * (self.max - self.min) + self.min
    }

    /// Map a slice of scaled values back to original units.
    pub fn inverse_slice(&self, scaled: &[f64]) -> Vec<f64> {
        scaled.iter().map(|&v| self.inverse(v)).collect()
    }

    /// Fitted minimum.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Fitted maximum.
    pub fn max(&self) -> f64 {
        self.max
    }
}

/// Per-pollutant min-max scalers for the full feature matrix.
#[derive(Debug, Clone)]
pub struct FeatureScaler {
    scalers: Vec<MinMaxScaler>,
}

impl FeatureScaler {
    /// Fit one scaler per pollutant column over the whole history.
    pub fn fit(series: &PollutantSeries) -> Result<Self> {
        let scalers = Pollutant::ALL
            .iter()
            .map(|&p| MinMaxScaler::fit(p.key(), series.column(p)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { scalers })
    }

    /// Scale feature rows column by column.
    pub fn transform_rows(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }

    /// Scale a single feature row.
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != NUM_POLLUTANTS {
            return Err(AqiError::DimensionMismatch {
                expected: NUM_POLLUTANTS,
                got: row.len(),
            });
        }
        Ok(row
            .iter()
            .zip(self.scalers.iter())
            .map(|(&v, scaler)| scaler.transform(v))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RawSample;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn transform_maps_fitted_domain_into_unit_interval() {
        let scaler = MinMaxScaler::fit("pm2_5", &[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();

        assert_relative_eq!(scaler.transform(10.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(scaler.transform(30.0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(scaler.transform(50.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn inverse_of_transform_recovers_original_values() {
        let values = [3.0, 7.5, 12.25, 40.0, 18.0];
        let scaler = MinMaxScaler::fit("o3", &values).unwrap();

        for &v in &values {
            assert_relative_eq!(scaler.inverse(scaler.transform(v)), v, epsilon = 1e-10);
        }
    }

    #[test]
    fn zero_variance_column_fails_fast() {
        let result = MinMaxScaler::fit("so2", &[5.0; 10]);
        assert!(
            matches!(result, Err(AqiError::ZeroVariance { column }) if column == "so2")
        );
    }

    #[test]
    fn empty_and_non_finite_columns_are_rejected() {
        assert!(matches!(
            MinMaxScaler::fit("co", &[]),
            Err(AqiError::EmptyData)
        ));
        assert!(matches!(
            MinMaxScaler::fit("co", &[1.0, f64::NAN]),
            Err(AqiError::ComputationError(_))
        ));
    }

    #[test]
    fn feature_scaler_scales_each_column_independently() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let samples: Vec<RawSample> = (0..4)
            .map(|i| {
                let mut sample = RawSample::new(base + Duration::hours(i as i64));
                for (c, pollutant) in Pollutant::ALL.iter().enumerate() {
                    // Distinct range per column.
                    sample = sample.set(*pollutant, (c + 1) as f64 * i as f64);
                }
                sample
            })
            .collect();
        let series = PollutantSeries::from_samples(&samples).unwrap();

        let scaler = FeatureScaler::fit(&series).unwrap();
        let scaled = scaler.transform_rows(&series.feature_rows()).unwrap();

        // Every column spans exactly [0, 1] over the fitted history.
        for c in 0..NUM_POLLUTANTS {
            assert_relative_eq!(scaled[0][c], 0.0, epsilon = 1e-12);
            assert_relative_eq!(scaled[3][c], 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn feature_scaler_names_the_degenerate_column() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let samples: Vec<RawSample> = (0..3)
            .map(|i| {
                let mut sample = RawSample::new(base + Duration::hours(i as i64));
                for pollutant in Pollutant::ALL {
                    sample = sample.set(pollutant, i as f64);
                }
                // Constant ozone column.
                sample.set(Pollutant::O3, 42.0)
            })
            .collect();
        let series = PollutantSeries::from_samples(&samples).unwrap();

        let result = FeatureScaler::fit(&series);
        assert!(matches!(result, Err(AqiError::ZeroVariance { column }) if column == "o3"));
    }

    #[test]
    fn transform_row_rejects_wrong_width() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let samples: Vec<RawSample> = (0..3)
            .map(|i| {
                let mut sample = RawSample::new(base + Duration::hours(i as i64));
                for pollutant in Pollutant::ALL {
                    sample = sample.set(pollutant, i as f64 + pollutant.column() as f64);
                }
                sample
            })
            .collect();
        let series = PollutantSeries::from_samples(&samples).unwrap();
        let scaler = FeatureScaler::fit(&series).unwrap();

        assert!(matches!(
            scaler.transform_row(&[1.0, 2.0]),
            Err(AqiError::DimensionMismatch { expected: 8, got: 2 })
        ));
    }
}
