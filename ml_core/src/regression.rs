use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::MlError;

/// A fitted ordinary least squares linear regression.
///
/// The weight vector is ordered like the feature set it was fitted on and is
/// only meaningful together with the exact scaler parameters from fit time;
/// the artifact bundle enforces that coupling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    weights: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    /// Fits by solving the normal equations `(XᵀX)β = Xᵀy` with an implicit
    /// intercept column. No regularization; the intercept is always present.
    ///
    /// # Errors
    /// - `MlError::ShapeMismatch` if `x` and `y` disagree on the row count.
    /// - `MlError::InvalidInput` if there are no rows or no columns.
    /// - `MlError::SingularSystem` if the normal equations have no unique
    ///   solution (e.g. perfectly collinear columns).
    pub fn fit(x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<Self, MlError> {
        let (rows, cols) = x.dim();
        if rows == 0 || cols == 0 {
            return Err(MlError::InvalidInput("training matrix is empty"));
        }
        if y.len() != rows {
            return Err(MlError::ShapeMismatch {
                what: "target rows",
                got: y.len(),
                expected: rows,
            });
        }

        // Design matrix with a leading column of ones for the intercept.
        let mut design = Array2::ones((rows, cols + 1));
        design.slice_mut(ndarray::s![.., 1..]).assign(&x);

        let xtx = design.t().dot(&design);
        let xty = design.t().dot(&y);
        let beta = solve(xtx, xty)?;

        Ok(Self {
            intercept: beta[0],
            weights: beta.iter().skip(1).copied().collect(),
        })
    }

    /// Rebuilds a model from persisted coefficients.
    pub fn from_parts(weights: Vec<f64>, intercept: f64) -> Self {
        Self { weights, intercept }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Predicts a single observation given its scaled feature vector.
    ///
    /// # Errors
    /// Returns `MlError::ShapeMismatch` if the input length differs from the
    /// fitted weight count.
    pub fn predict_one(&self, x: &[f64]) -> Result<f64, MlError> {
        if x.len() != self.weights.len() {
            return Err(MlError::ShapeMismatch {
                what: "input features",
                got: x.len(),
                expected: self.weights.len(),
            });
        }

        let dot: f64 = self.weights.iter().zip(x).map(|(w, v)| w * v).sum();
        Ok(dot + self.intercept)
    }

    /// Predicts every row of a scaled feature matrix.
    ///
    /// # Errors
    /// Returns `MlError::ShapeMismatch` on a column-count mismatch.
    pub fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>, MlError> {
        if x.ncols() != self.weights.len() {
            return Err(MlError::ShapeMismatch {
                what: "input columns",
                got: x.ncols(),
                expected: self.weights.len(),
            });
        }

        let w = ArrayView1::from(self.weights.as_slice());
        Ok(x.dot(&w) + self.intercept)
    }
}

/// Solves `a * x = b` by Gaussian elimination with partial pivoting.
///
/// The systems here are tiny (one row/column per feature plus the
/// intercept), so a dense textbook solve is all that is needed.
fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Result<Array1<f64>, MlError> {
    let n = b.len();
    debug_assert_eq!(a.dim(), (n, n));

    for col in 0..n {
        // Pivot on the largest remaining magnitude in this column.
        let pivot_row = (col..n)
            .max_by(|&i, &j| a[[i, col]].abs().total_cmp(&a[[j, col]].abs()))
            .unwrap_or(col);
        if a[[pivot_row, col]].abs() < 1e-12 {
            return Err(MlError::SingularSystem);
        }
        if pivot_row != col {
            for k in 0..n {
                let tmp = a[[col, k]];
                a[[col, k]] = a[[pivot_row, k]];
                a[[pivot_row, k]] = tmp;
            }
            b.swap(col, pivot_row);
        }

        for row in (col + 1)..n {
            let factor = a[[row, col]] / a[[col, col]];
            for k in col..n {
                a[[row, k]] -= factor * a[[col, k]];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = Array1::zeros(n);
    for row in (0..n).rev() {
        let mut acc = b[row];
        for k in (row + 1)..n {
            acc -= a[[row, k]] * x[k];
        }
        x[row] = acc / a[[row, row]];
    }

    Ok(x)
}
