//! End-to-end forecast pipeline orchestration.
//!
//! One synchronous batch run: derive the composite index, scale, window,
//! split, train, evaluate, and assemble the forward-looking forecast.
//! Each run owns its scalers and model exclusively; fitted state is never
//! shared across runs, since ranges fitted on one location's history are
//! invalid for another.

use chrono::Duration;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::aqi;
use crate::core::{hourly_records, ForecastRecord, PollutantSeries};
use crate::dataset::{split_chronological, DEFAULT_TRAIN_FRACTION};
use crate::error::{AqiError, Result};
use crate::models::SequenceRegressor;
use crate::transform::{FeatureScaler, MinMaxScaler, SequenceWindower};
use crate::utils::{calculate_metrics, ForecastMetrics};

/// Pipeline parameters, loadable from configuration.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Consecutive historical samples fed to the regressor (W).
    pub input_window: usize,
    /// Future samples predicted in one call (H).
    pub horizon: usize,
    /// Share of sequence pairs used for training.
    pub train_fraction: f64,
    /// Reject non-hourly steps instead of logging them.
    pub strict_cadence: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_window: SequenceWindower::DEFAULT_INPUT_WINDOW,
            horizon: SequenceWindower::DEFAULT_HORIZON,
            train_fraction: DEFAULT_TRAIN_FRACTION,
            strict_cadence: false,
        }
    }
}

/// The entire output surface of one successful run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Exactly H hourly records, contiguous from last observed + 1h.
    pub forecast: Vec<ForecastRecord>,
    /// Held-out accuracy in composite-index units.
    pub metrics: ForecastMetrics,
}

/// The forecasting pipeline for one location's history.
#[derive(Debug, Clone)]
pub struct ForecastPipeline {
    config: PipelineConfig,
}

impl ForecastPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline against one history with one model.
    ///
    /// Model fit/predict failures surface as
    /// [`AqiError::ForecastFailed`]; nothing is retried and no partial
    /// outcome is returned.
    pub fn run(
        &self,
        series: &PollutantSeries,
        model: &mut dyn SequenceRegressor,
    ) -> Result<PipelineOutcome> {
        let windower = SequenceWindower::new(self.config.input_window, self.config.horizon)?;

        let (series, target) = self.derive_target(series)?;
        let gaps = series.hourly_gaps();
        if !gaps.is_empty() {
            if self.config.strict_cadence {
                return Err(AqiError::TimestampError(format!(
                    "{} non-hourly steps in history",
                    gaps.len()
                )));
            }
            warn!(
                "history contains {} non-hourly steps; windows will span them",
                gaps.len()
            );
        }

        // Scalers are fitted once on the full history and reused for every
        // de-scaling below; they are dropped with this stack frame.
        let feature_scaler = FeatureScaler::fit(&series)?;
        let target_scaler = MinMaxScaler::fit("composite_index", &target)?;

        let scaled_features = feature_scaler.transform_rows(&series.feature_rows())?;
        let scaled_target = target_scaler.transform_slice(&target);

        let pairs = windower.build(&scaled_features, &scaled_target)?;
        info!("built {} sequence pairs from {} samples", pairs.len(), series.len());

        let split = split_chronological(pairs, self.config.train_fraction)?;
        if split.test.is_empty() {
            return Err(AqiError::InvalidParameter(format!(
                "train fraction {} leaves the test partition empty",
                self.config.train_fraction
            )));
        }
        debug!(
            "temporal split: {} train pairs, {} test pairs",
            split.train.len(),
            split.test.len()
        );

        let (train_windows, train_targets): (Vec<_>, Vec<_>) = split
            .train
            .into_iter()
            .map(|pair| (pair.input, pair.target))
            .unzip();
        model
            .fit(&train_windows, &train_targets)
            .map_err(AqiError::forecast_failed)?;
        info!("fitted {} on {} training pairs", model.name(), train_windows.len());

        let (test_windows, test_targets): (Vec<_>, Vec<_>) = split
            .test
            .into_iter()
            .map(|pair| (pair.input, pair.target))
            .unzip();
        let predicted = model
            .predict(&test_windows)
            .map_err(AqiError::forecast_failed)?;

        // Metrics are computed in original index units, never on
        // normalized values.
        let actual: Vec<Vec<f64>> = test_targets
            .iter()
            .map(|t| target_scaler.inverse_slice(t))
            .collect();
        let predicted: Vec<Vec<f64>> = predicted
            .iter()
            .map(|p| target_scaler.inverse_slice(p))
            .collect();
        let metrics = calculate_metrics(&actual, &predicted)?;
        info!("held-out accuracy: rmse {:.2}, mae {:.2}", metrics.rmse, metrics.mae);

        let forecast = self.generate_forecast(
            &series,
            &scaled_features,
            &target_scaler,
            &windower,
            model,
        )?;

        Ok(PipelineOutcome { forecast, metrics })
    }

    /// Derive the composite index and drop samples where it is undefined.
    ///
    /// Missing concentrations never reach the scaler: the deriver runs on
    /// raw values, undefined-index samples are removed (never coerced to
    /// zero), and remaining feature holes are linearly interpolated.
    fn derive_target(&self, series: &PollutantSeries) -> Result<(PollutantSeries, Vec<f64>)> {
        let composite: Vec<Option<f64>> = (0..series.len())
            .map(|i| aqi::composite_index(&series.row(i)))
            .collect();

        let keep: Vec<usize> = composite
            .iter()
            .enumerate()
            .filter_map(|(i, index)| index.map(|_| i))
            .collect();
        if keep.is_empty() {
            return Err(AqiError::EmptyData);
        }
        if keep.len() < series.len() {
            debug!(
                "dropping {} samples with undefined composite index",
                series.len() - keep.len()
            );
        }

        let series = series.retain_indices(&keep)?;
        let target: Vec<f64> = composite.into_iter().flatten().collect();

        let series = if series.has_missing_values() {
            debug!("interpolating missing concentrations before scaling");
            series.interpolated()
        } else {
            series
        };

        Ok((series, target))
    }

    /// Predict from the most recent window of the full scaled series and
    /// stamp contiguous hourly timestamps onto the de-scaled output.
    fn generate_forecast(
        &self,
        series: &PollutantSeries,
        scaled_features: &[Vec<f64>],
        target_scaler: &MinMaxScaler,
        windower: &SequenceWindower,
        model: &dyn SequenceRegressor,
    ) -> Result<Vec<ForecastRecord>> {
        let latest_window =
            scaled_features[scaled_features.len() - windower.input_window()..].to_vec();
        let mut predictions = model
            .predict(&[latest_window])
            .map_err(AqiError::forecast_failed)?;

        let scaled = predictions.pop().ok_or_else(|| {
            AqiError::ComputationError("model returned no horizon vector".to_string())
        })?;
        if scaled.len() != windower.horizon() {
            return Err(AqiError::DimensionMismatch {
                expected: windower.horizon(),
                got: scaled.len(),
            });
        }

        let values = target_scaler.inverse_slice(&scaled);
        let start = series.last_timestamp()? + Duration::hours(1);
        Ok(hourly_records(start, &values))
    }
}
