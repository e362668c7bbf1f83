//! Linear baseline regressor over the most recent window row.
//!
//! Fits one least-squares regression per horizon step, each mapping the
//! window's latest feature row to that step's target. Captures linear
//! pollutant trends without any sequence memory.

use crate::error::{AqiError, Result};
use crate::models::{check_window, training_shape, InputWindow, SequenceRegressor, TrainingShape};
use crate::utils::{ols_fit, OlsFit};

/// Per-horizon-step least-squares regressor on the last feature row.
#[derive(Debug, Clone, Default)]
pub struct LastRowLinear {
    step_fits: Option<Vec<OlsFit>>,
    shape: Option<TrainingShape>,
}

impl LastRowLinear {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SequenceRegressor for LastRowLinear {
    fn fit(&mut self, windows: &[InputWindow], targets: &[Vec<f64>]) -> Result<()> {
        let shape = training_shape(windows, targets)?;

        let last_rows: Vec<Vec<f64>> = windows
            .iter()
            .map(|window| window[shape.window_len - 1].clone())
            .collect();

        let mut step_fits = Vec::with_capacity(shape.horizon);
        for step in 0..shape.horizon {
            let step_targets: Vec<f64> = targets.iter().map(|t| t[step]).collect();
            step_fits.push(ols_fit(&last_rows, &step_targets)?);
        }

        self.step_fits = Some(step_fits);
        self.shape = Some(shape);
        Ok(())
    }

    fn predict(&self, windows: &[InputWindow]) -> Result<Vec<Vec<f64>>> {
        let step_fits = self.step_fits.as_ref().ok_or(AqiError::FitRequired)?;
        let shape = self.shape.ok_or(AqiError::FitRequired)?;

        windows
            .iter()
            .map(|window| {
                check_window(window, shape)?;
                let last_row = &window[shape.window_len - 1];
                step_fits
                    .iter()
                    .map(|fit| fit.predict_row(last_row))
                    .collect()
            })
            .collect()
    }

    fn name(&self) -> &str {
        "LastRowLinear"
    }

    fn is_fitted(&self) -> bool {
        self.step_fits.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Windows whose last row is [t, 2t]; step-h target is t + h + 1.
    fn make_batch(n: usize) -> (Vec<InputWindow>, Vec<Vec<f64>>) {
        let windows: Vec<InputWindow> = (0..n)
            .map(|t| {
                (0..3)
                    .map(|r| {
                        let v = (t + r) as f64;
                        vec![v, 2.0 * v]
                    })
                    .collect()
            })
            .collect();
        let targets: Vec<Vec<f64>> = (0..n)
            .map(|t| (1..=2).map(|h| (t + 2 + h) as f64).collect())
            .collect();
        (windows, targets)
    }

    #[test]
    fn recovers_a_linear_relation_exactly() {
        let (windows, targets) = make_batch(12);

        let mut model = LastRowLinear::new();
        model.fit(&windows, &targets).unwrap();

        let predictions = model.predict(&windows).unwrap();
        for (predicted, expected) in predictions.iter().zip(targets.iter()) {
            for (p, e) in predicted.iter().zip(expected.iter()) {
                assert_relative_eq!(p, e, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn extrapolates_beyond_the_training_range() {
        let (windows, targets) = make_batch(12);

        let mut model = LastRowLinear::new();
        model.fit(&windows, &targets).unwrap();

        // An unseen window further along the same trend.
        let t = 20.0;
        let window: InputWindow = (0..3)
            .map(|r| vec![t + r as f64, 2.0 * (t + r as f64)])
            .collect();
        let predictions = model.predict(&[window]).unwrap();

        assert_relative_eq!(predictions[0][0], t + 3.0, epsilon = 1e-3);
        assert_relative_eq!(predictions[0][1], t + 4.0, epsilon = 1e-3);
    }

    #[test]
    fn requires_fit_before_predict() {
        let model = LastRowLinear::new();
        let (windows, _) = make_batch(1);
        assert!(matches!(
            model.predict(&windows),
            Err(AqiError::FitRequired)
        ));
    }

    #[test]
    fn rejects_mismatched_feature_width_at_predict() {
        let (windows, targets) = make_batch(8);

        let mut model = LastRowLinear::new();
        model.fit(&windows, &targets).unwrap();

        let wrong: Vec<InputWindow> = vec![vec![vec![1.0]; 3]];
        assert!(model.predict(&wrong).is_err());
    }
}
