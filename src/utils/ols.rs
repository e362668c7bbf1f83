//! Least-squares fitting over positional feature rows.
//!
//! Used by the linear baseline regressor, one fit per horizon step.

use crate::error::{AqiError, Result};

/// Fitted least-squares coefficients and intercept.
#[derive(Debug, Clone)]
pub struct OlsFit {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl OlsFit {
    /// Predict the target for one feature row.
    pub fn predict_row(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.coefficients.len() {
            return Err(AqiError::DimensionMismatch {
                expected: self.coefficients.len(),
                got: row.len(),
            });
        }
        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(row.iter())
                .map(|(c, x)| c * x)
                .sum::<f64>())
    }
}

/// Fit `y = intercept + row · coefficients` over observation rows.
///
/// Solves the normal equations via Cholesky decomposition, with a small
/// ridge term on the diagonal for numerical stability.
pub fn ols_fit(rows: &[Vec<f64>], y: &[f64]) -> Result<OlsFit> {
    let n = y.len();
    if n == 0 {
        return Err(AqiError::EmptyData);
    }
    if rows.len() != n {
        return Err(AqiError::DimensionMismatch {
            expected: n,
            got: rows.len(),
        });
    }

    let k = rows[0].len();
    for row in rows {
        if row.len() != k {
            return Err(AqiError::DimensionMismatch {
                expected: k,
                got: row.len(),
            });
        }
    }

    if k == 0 {
        // No regressors: the mean is the least-squares intercept.
        return Ok(OlsFit {
            intercept: y.iter().sum::<f64>() / n as f64,
            coefficients: vec![],
        });
    }

    // Normal equations with an intercept column: X'X beta = X'y,
    // where X has columns [1, x_1, .., x_k].
    let num_params = k + 1;
    let mut xtx = vec![vec![0.0; num_params]; num_params];
    let mut xty = vec![0.0; num_params];

    for (row, &y_obs) in rows.iter().zip(y.iter()) {
        xtx[0][0] += 1.0;
        for (j, &xj) in row.iter().enumerate() {
            xtx[0][j + 1] += xj;
            xtx[j + 1][0] += xj;
        }
        for (i, &xi) in row.iter().enumerate() {
            for (j, &xj) in row.iter().enumerate() {
                xtx[i + 1][j + 1] += xi * xj;
            }
        }

        xty[0] += y_obs;
        for (i, &xi) in row.iter().enumerate() {
            xty[i + 1] += xi * y_obs;
        }
    }

    for i in 0..num_params {
        xtx[i][i] += 1e-8;
    }

    let beta = solve_symmetric(&xtx, &xty).ok_or_else(|| {
        AqiError::ComputationError("least-squares system is not positive definite".to_string())
    })?;

    Ok(OlsFit {
        intercept: beta[0],
        coefficients: beta[1..].to_vec(),
    })
}

/// Solve `A x = b` for symmetric positive definite `A` via Cholesky.
fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }
            if i == j {
                if sum <= 0.0 {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Some(x)
}
