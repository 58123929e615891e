use ndarray::{Array1, Array2};

use ml_core::{evaluate, Evaluation, Feature, LinearModel, QuarterRecord, ScalerParams};

use crate::TrainerError;

/// Feature set including the real price index.
pub const WITH_INDEX: &[Feature] = &[
    Feature::RealPriceIndex,
    Feature::AvgLotArea,
    Feature::SaleCount,
    Feature::Year,
    Feature::QuarterNum,
];

/// Feature set excluding the real price index.
pub const WITHOUT_INDEX: &[Feature] = &[
    Feature::AvgLotArea,
    Feature::SaleCount,
    Feature::Year,
    Feature::QuarterNum,
];

pub const WITH_INDEX_LABEL: &str = "with_index";
pub const WITHOUT_INDEX_LABEL: &str = "without_index";

/// Everything one variant run produces: the fitted model, the scaler params
/// it was fitted with, and its held-out metrics. The three travel together
/// from here on.
#[derive(Debug, Clone)]
pub struct VariantOutcome {
    pub model: LinearModel,
    pub scaler: ScalerParams,
    pub evaluation: Evaluation,
}

/// Builds the scaled design matrix and target vector for a split.
fn design_matrix(
    records: &[QuarterRecord],
    features: &[Feature],
    scaler: &ScalerParams,
) -> Result<(Array2<f64>, Array1<f64>), TrainerError> {
    let mut x = Array2::zeros((records.len(), features.len()));
    let mut y = Array1::zeros(records.len());

    for (i, record) in records.iter().enumerate() {
        let scaled = scaler.scale_record(record, features)?;
        for (j, value) in scaled.into_iter().enumerate() {
            x[[i, j]] = value;
        }
        y[i] = record.target();
    }

    Ok((x, y))
}

/// Runs one feature-set variant end to end.
///
/// Fits the scaler on the training split only, scales both splits with those
/// fixed params, fits the regression, and evaluates on the held-out split.
/// The target is never scaled.
///
/// # Errors
/// Returns `TrainerError::Ml` if either split is empty or the fit fails.
pub fn run_variant(
    train: &[QuarterRecord],
    test: &[QuarterRecord],
    features: &[Feature],
    label: &str,
) -> Result<VariantOutcome, TrainerError> {
    let scaler = ScalerParams::fit(train, features)?;

    let (x_train, y_train) = design_matrix(train, features, &scaler)?;
    let (x_test, y_test) = design_matrix(test, features, &scaler)?;

    let model = LinearModel::fit(x_train.view(), y_train.view())?;
    let evaluation = evaluate(&model, x_test.view(), y_test.view(), label)?;

    Ok(VariantOutcome {
        model,
        scaler,
        evaluation,
    })
}

/// Picks the winner by RMSE alone. A tie goes to `a`, so the with-index
/// variant wins when it is compared first. MAE and R² are reported but never
/// consulted.
pub fn select_best<'a>(a: &'a VariantOutcome, b: &'a VariantOutcome) -> &'a VariantOutcome {
    if a.evaluation.rmse <= b.evaluation.rmse {
        a
    } else {
        b
    }
}
