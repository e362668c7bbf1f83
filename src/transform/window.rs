//! Supervised sequence construction from a scaled, ordered series.

use crate::error::{AqiError, Result};

/// One supervised pair: an input window of feature rows and the horizon
/// of target values that immediately follows it.
///
/// Pairs are created here, consumed once by training or evaluation, and
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SequencePair {
    /// W consecutive feature rows, chronological.
    pub input: Vec<Vec<f64>>,
    /// H consecutive scaled target values, starting right after `input`.
    pub target: Vec<f64>,
}

/// Slices a series into (input-window, forecast-horizon) pairs.
#[derive(Debug, Clone, Copy)]
pub struct SequenceWindower {
    input_window: usize,
    horizon: usize,
}

impl SequenceWindower {
    /// Default input window: ten days of hourly samples.
    pub const DEFAULT_INPUT_WINDOW: usize = 240;
    /// Default forecast horizon: seven days of hourly samples.
    pub const DEFAULT_HORIZON: usize = 168;

    pub fn new(input_window: usize, horizon: usize) -> Result<Self> {
        if input_window == 0 || horizon == 0 {
            return Err(AqiError::InvalidParameter(
                "input window and horizon must be positive".to_string(),
            ));
        }
        Ok(Self {
            input_window,
            horizon,
        })
    }

    pub fn input_window(&self) -> usize {
        self.input_window
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Minimum series length that yields at least one pair.
    pub fn min_samples(&self) -> usize {
        self.input_window + self.horizon
    }

    /// Build all supervised pairs from aligned feature rows and targets.
    ///
    /// For a series of length N this produces exactly `N - W - H + 1`
    /// pairs in chronological order; pair `i` has input rows `[i, i+W)`
    /// and targets `[i+W, i+W+H)`. Reordering is never permitted, so the
    /// later temporal split stays free of look-ahead leakage.
    pub fn build(&self, features: &[Vec<f64>], target: &[f64]) -> Result<Vec<SequencePair>> {
        if features.len() != target.len() {
            return Err(AqiError::DimensionMismatch {
                expected: features.len(),
                got: target.len(),
            });
        }

        let n = features.len();
        let needed = self.min_samples();
        if n < needed {
            return Err(AqiError::InsufficientHistory { needed, got: n });
        }

        let count = n - self.input_window - self.horizon + 1;
        let mut pairs = Vec::with_capacity(count);
        for i in 0..count {
            let input_end = i + self.input_window;
            pairs.push(SequencePair {
                input: features[i..input_end].to_vec(),
                target: target[input_end..input_end + self.horizon].to_vec(),
            });
        }

        Ok(pairs)
    }
}
