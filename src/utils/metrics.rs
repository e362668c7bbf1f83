//! Accuracy metrics for forecast evaluation.
//!
//! Metrics are always computed in composite-index units: the pipeline
//! de-scales predictions and test targets before calling in here, so
//! reported error is comparable across differently-scaled runs.

use serde::{Deserialize, Serialize};

use crate::error::{AqiError, Result};

/// Root-mean-square and mean-absolute error of a forecast, in
/// composite-index units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastMetrics {
    pub rmse: f64,
    pub mae: f64,
}

/// Compute RMSE and MAE over aligned horizon vectors.
///
/// `actual` and `predicted` hold one H-length vector per test pair;
/// errors are pooled across all pairs and steps.
pub fn calculate_metrics(actual: &[Vec<f64>], predicted: &[Vec<f64>]) -> Result<ForecastMetrics> {
    if actual.is_empty() || predicted.is_empty() {
        return Err(AqiError::EmptyData);
    }
    if actual.len() != predicted.len() {
        return Err(AqiError::DimensionMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }

    let mut count = 0usize;
    let mut abs_sum = 0.0;
    let mut sq_sum = 0.0;

    for (a_vec, p_vec) in actual.iter().zip(predicted.iter()) {
        if a_vec.len() != p_vec.len() {
            return Err(AqiError::DimensionMismatch {
                expected: a_vec.len(),
                got: p_vec.len(),
            });
        }
        for (a, p) in a_vec.iter().zip(p_vec.iter()) {
            let err = a - p;
            abs_sum += err.abs();
            sq_sum += err * err;
            count += 1;
        }
    }

    if count == 0 {
        return Err(AqiError::EmptyData);
    }

    let n = count as f64;
    Ok(ForecastMetrics {
        rmse: (sq_sum / n).sqrt(),
        mae: abs_sum / n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perfect_forecast_has_zero_error() {
        let actual = vec![vec![70.0, 80.0], vec![90.0, 100.0]];
        let metrics = calculate_metrics(&actual, &actual).unwrap();

        assert_relative_eq!(metrics.rmse, 0.0, epsilon = 1e-12);
        assert_relative_eq!(metrics.mae, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn metrics_pool_across_pairs_and_steps() {
        let actual = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let predicted = vec![vec![2.0, 2.0], vec![3.0, 1.0]];
        // Errors: 1, 0, 0, 3.
        let metrics = calculate_metrics(&actual, &predicted).unwrap();

        assert_relative_eq!(metrics.mae, 1.0, epsilon = 1e-12);
        assert_relative_eq!(metrics.rmse, (10.0_f64 / 4.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn rmse_is_at_least_mae() {
        let actual = vec![vec![1.0, 5.0, 9.0, 2.0]];
        let predicted = vec![vec![2.0, 3.0, 10.0, -1.0]];
        let metrics = calculate_metrics(&actual, &predicted).unwrap();

        assert!(metrics.rmse >= metrics.mae);
        assert!(metrics.mae >= 0.0);
    }

    #[test]
    fn shape_mismatches_are_rejected() {
        assert!(matches!(
            calculate_metrics(&[], &[]),
            Err(AqiError::EmptyData)
        ));
        assert!(calculate_metrics(&[vec![1.0]], &[vec![1.0], vec![2.0]]).is_err());
        assert!(calculate_metrics(&[vec![1.0, 2.0]], &[vec![1.0]]).is_err());
    }
}
