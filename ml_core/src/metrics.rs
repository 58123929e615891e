use ndarray::{ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::{LinearModel, MlError};

/// Regression metrics of one feature-set variant on the held-out split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Variant label, e.g. `"with_index"`.
    pub label: String,
    /// Mean absolute error.
    pub mae: f64,
    /// Root mean squared error. The sole model selection criterion.
    pub rmse: f64,
    /// Coefficient of determination about the mean of the test targets.
    pub r2: f64,
}

/// Evaluates a fitted model on a scaled held-out split.
///
/// R² is `1 - RSS/TSS`; a constant test target (TSS of zero) yields an R²
/// of 0.0 rather than a division by zero.
///
/// # Errors
/// - `MlError::InvalidInput` if the test split is empty.
/// - `MlError::ShapeMismatch` if rows and targets disagree, or the matrix
///   width does not match the model.
pub fn evaluate(
    model: &LinearModel,
    x_test: ArrayView2<f64>,
    y_test: ArrayView1<f64>,
    label: &str,
) -> Result<Evaluation, MlError> {
    if y_test.is_empty() {
        return Err(MlError::InvalidInput("test split is empty"));
    }
    if x_test.nrows() != y_test.len() {
        return Err(MlError::ShapeMismatch {
            what: "test rows",
            got: x_test.nrows(),
            expected: y_test.len(),
        });
    }

    let y_pred = model.predict(x_test)?;
    let residuals = &y_pred - &y_test;
    let n = y_test.len() as f64;

    let mae = residuals.iter().map(|r| r.abs()).sum::<f64>() / n;
    let rss = residuals.iter().map(|r| r * r).sum::<f64>();
    let rmse = (rss / n).sqrt();

    let y_mean = y_test.sum() / n;
    let tss = y_test.iter().map(|y| (y - y_mean).powi(2)).sum::<f64>();
    let r2 = if tss == 0.0 { 0.0 } else { 1.0 - rss / tss };

    Ok(Evaluation {
        label: label.to_string(),
        mae,
        rmse,
        r2,
    })
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn test_perfect_fit_has_zero_error() {
        let model = LinearModel::from_parts(vec![2.0], 1.0);
        let x = array![[0.0], [1.0], [2.0]];
        let y = array![1.0, 3.0, 5.0];

        let eval = evaluate(&model, x.view(), y.view(), "exact").unwrap();
        assert_eq!(eval.mae, 0.0);
        assert_eq!(eval.rmse, 0.0);
        assert_eq!(eval.r2, 1.0);
        assert_eq!(eval.label, "exact");
    }

    #[test]
    fn test_known_residuals() {
        // Predictions are y + 1 everywhere: MAE = RMSE = 1.
        let model = LinearModel::from_parts(vec![0.0], 3.0);
        let x = array![[0.0], [0.0]];
        let y = array![2.0, 2.0];

        let eval = evaluate(&model, x.view(), y.view(), "offset").unwrap();
        assert_eq!(eval.mae, 1.0);
        assert_eq!(eval.rmse, 1.0);
        // Constant target: TSS is zero, R² pinned to 0.
        assert_eq!(eval.r2, 0.0);
    }

    #[test]
    fn test_rejects_empty_test_split() {
        let model = LinearModel::from_parts(vec![1.0], 0.0);
        let x = ndarray::Array2::<f64>::zeros((0, 1));
        let y = ndarray::Array1::<f64>::zeros(0);

        assert!(evaluate(&model, x.view(), y.view(), "empty").is_err());
    }
}
