//! Temporal train/test partitioning of sequence pairs.

use crate::error::{AqiError, Result};
use crate::transform::SequencePair;

/// Default share of pairs used for training.
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.95;

/// A chronological train/test partition of sequence pairs.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train: Vec<SequencePair>,
    pub test: Vec<SequencePair>,
}

/// Split pairs at `floor(train_fraction * n)`, preserving order.
///
/// The cut is a single deterministic index, never a shuffle: because the
/// pairs are chronological, every test pair starts at or after every
/// train pair, which keeps evaluation free of look-ahead bias.
pub fn split_chronological(
    pairs: Vec<SequencePair>,
    train_fraction: f64,
) -> Result<TrainTestSplit> {
    if !(train_fraction > 0.0 && train_fraction <= 1.0) {
        return Err(AqiError::InvalidParameter(format!(
            "train fraction must be in (0, 1], got {train_fraction}"
        )));
    }

    let mut train = pairs;
    let split_index = (train_fraction * train.len() as f64).floor() as usize;
    let test = train.split_off(split_index.min(train.len()));

    Ok(TrainTestSplit { train, test })
}
