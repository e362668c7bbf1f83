//! Sequence regression models.

mod traits;

pub mod baseline;

pub use traits::{BoxedRegressor, InputWindow, SequenceRegressor};

pub(crate) use traits::{check_window, training_shape, TrainingShape};
