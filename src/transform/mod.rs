//! Data transformations feeding the regressor.
//!
//! Min-max scaling of feature and target columns, and supervised
//! sequence construction over the scaled series.

pub mod scale;
pub mod window;

pub use scale::{FeatureScaler, MinMaxScaler};
pub use window::{SequencePair, SequenceWindower};
