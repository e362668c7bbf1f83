//! The sequence-regressor capability boundary.

use crate::error::{AqiError, Result};

/// One input window: W consecutive feature rows of F columns each.
pub type InputWindow = Vec<Vec<f64>>;

/// Common interface for multi-horizon sequence regressors.
///
/// The pipeline is architecture-agnostic: any regressor honoring this
/// shape contract — `fit` over ([W×F] windows, [H] targets), `predict`
/// returning one [H] vector per window — is substitutable without
/// touching pipeline logic. The trait is object-safe and usable as
/// `Box<dyn SequenceRegressor>`.
pub trait SequenceRegressor {
    /// Fit the regressor on aligned windows and horizon targets.
    fn fit(&mut self, windows: &[InputWindow], targets: &[Vec<f64>]) -> Result<()>;

    /// Predict one horizon vector per input window.
    fn predict(&self, windows: &[InputWindow]) -> Result<Vec<Vec<f64>>>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool;
}

/// Type alias for boxed regressor trait objects.
pub type BoxedRegressor = Box<dyn SequenceRegressor>;

/// Window/target dimensions checked at the fit boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TrainingShape {
    pub window_len: usize,
    pub num_features: usize,
    pub horizon: usize,
}

/// Validate a training batch and return its common shape.
pub(crate) fn training_shape(
    windows: &[InputWindow],
    targets: &[Vec<f64>],
) -> Result<TrainingShape> {
    if windows.is_empty() || targets.is_empty() {
        return Err(AqiError::EmptyData);
    }
    if windows.len() != targets.len() {
        return Err(AqiError::DimensionMismatch {
            expected: windows.len(),
            got: targets.len(),
        });
    }

    let shape = TrainingShape {
        window_len: windows[0].len(),
        num_features: windows[0].first().map(|row| row.len()).unwrap_or(0),
        horizon: targets[0].len(),
    };
    if shape.window_len == 0 || shape.num_features == 0 || shape.horizon == 0 {
        return Err(AqiError::InvalidParameter(
            "windows and targets must be non-empty".to_string(),
        ));
    }

    for window in windows {
        check_window(window, shape)?;
    }
    for target in targets {
        if target.len() != shape.horizon {
            return Err(AqiError::DimensionMismatch {
                expected: shape.horizon,
                got: target.len(),
            });
        }
    }

    Ok(shape)
}

/// Validate one prediction window against the fitted shape.
pub(crate) fn check_window(window: &InputWindow, shape: TrainingShape) -> Result<()> {
    if window.len() != shape.window_len {
        return Err(AqiError::DimensionMismatch {
            expected: shape.window_len,
            got: window.len(),
        });
    }
    for row in window {
        if row.len() != shape.num_features {
            return Err(AqiError::DimensionMismatch {
                expected: shape.num_features,
                got: row.len(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::baseline::HorizonMean;

    fn make_batch(n: usize, w: usize, f: usize, h: usize) -> (Vec<InputWindow>, Vec<Vec<f64>>) {
        let windows = (0..n)
            .map(|i| vec![vec![i as f64; f]; w])
            .collect::<Vec<_>>();
        let targets = (0..n).map(|i| vec![i as f64; h]).collect::<Vec<_>>();
        (windows, targets)
    }

    #[test]
    fn training_shape_accepts_consistent_batches() {
        let (windows, targets) = make_batch(4, 3, 8, 2);
        let shape = training_shape(&windows, &targets).unwrap();
        assert_eq!(shape.window_len, 3);
        assert_eq!(shape.num_features, 8);
        assert_eq!(shape.horizon, 2);
    }

    #[test]
    fn training_shape_rejects_ragged_batches() {
        let (mut windows, targets) = make_batch(4, 3, 8, 2);
        windows[2].pop();
        assert!(training_shape(&windows, &targets).is_err());

        let (windows, mut targets) = make_batch(4, 3, 8, 2);
        targets[1].push(0.0);
        assert!(training_shape(&windows, &targets).is_err());

        let (windows, targets) = make_batch(4, 3, 8, 2);
        assert!(training_shape(&windows, &targets[..3]).is_err());
        assert!(training_shape(&[], &[]).is_err());
    }

    #[test]
    fn boxed_regressor_round_trips_through_the_trait() {
        let (windows, targets) = make_batch(4, 3, 8, 2);

        let mut model: BoxedRegressor = Box::new(HorizonMean::new());
        assert!(!model.is_fitted());

        model.fit(&windows, &targets).unwrap();
        assert!(model.is_fitted());

        let predictions = model.predict(&windows[..2]).unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].len(), 2);
    }
}
