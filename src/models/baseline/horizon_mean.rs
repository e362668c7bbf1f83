//! Horizon-mean baseline regressor.
//!
//! Predicts the per-step mean of the training targets for every window.
//! Serves as the benchmark floor any real regressor should beat.

use crate::error::{AqiError, Result};
use crate::models::{check_window, training_shape, InputWindow, SequenceRegressor, TrainingShape};

/// Baseline that learns one mean per horizon step.
#[derive(Debug, Clone, Default)]
pub struct HorizonMean {
    step_means: Option<Vec<f64>>,
    shape: Option<TrainingShape>,
}

impl HorizonMean {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SequenceRegressor for HorizonMean {
    fn fit(&mut self, windows: &[InputWindow], targets: &[Vec<f64>]) -> Result<()> {
        let shape = training_shape(windows, targets)?;

        let n = targets.len() as f64;
        let mut step_means = vec![0.0; shape.horizon];
        for target in targets {
            for (mean, value) in step_means.iter_mut().zip(target.iter()) {
                *mean += value / n;
            }
        }

        self.step_means = Some(step_means);
        self.shape = Some(shape);
        Ok(())
    }

    fn predict(&self, windows: &[InputWindow]) -> Result<Vec<Vec<f64>>> {
        let step_means = self.step_means.as_ref().ok_or(AqiError::FitRequired)?;
        let shape = self.shape.ok_or(AqiError::FitRequired)?;

        windows
            .iter()
            .map(|window| {
                check_window(window, shape)?;
                Ok(step_means.clone())
            })
            .collect()
    }

    fn name(&self) -> &str {
        "HorizonMean"
    }

    fn is_fitted(&self) -> bool {
        self.step_means.is_some()
    }
}
