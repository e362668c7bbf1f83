//! Baseline sequence regressors.
//!
//! Simple methods that honor the train/predict shape contract and serve
//! as benchmarks for external models.

mod horizon_mean;
mod linear;

pub use horizon_mean::HorizonMean;
pub use linear::LastRowLinear;
