use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ml_core::{Evaluation, Feature, LinearModel, ScalerParams};

use crate::ArtifactError;

/// Version tag written into the model document. Bumped on any change to the
/// persisted layout.
pub const FORMAT_VERSION: u32 = 1;

/// The atomic unit of inference state: model coefficients, the scaler
/// parameters fitted alongside them, and the ordered feature list.
///
/// The three parts are only meaningful together; the constructor rejects any
/// combination that disagrees with itself, so a predictor can never be built
/// from mismatched files.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelBundle {
    model: LinearModel,
    scaler: ScalerParams,
    features: Vec<Feature>,
}

impl ModelBundle {
    /// Assembles a bundle, checking mutual consistency.
    ///
    /// # Errors
    /// Returns `ArtifactError::Inconsistent` if the weight count differs
    /// from the feature count or any feature lacks scaler parameters.
    pub fn new(
        model: LinearModel,
        scaler: ScalerParams,
        features: Vec<Feature>,
    ) -> Result<Self, ArtifactError> {
        if model.weights().len() != features.len() {
            return Err(ArtifactError::Inconsistent(format!(
                "model has {} weight(s) but the feature list has {} entries",
                model.weights().len(),
                features.len()
            )));
        }
        for feature in &features {
            if !scaler.contains(feature.name()) {
                return Err(ArtifactError::Inconsistent(format!(
                    "feature {:?} has no scaler parameters",
                    feature.name()
                )));
            }
        }

        Ok(Self {
            model,
            scaler,
            features,
        })
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    pub fn scaler(&self) -> &ScalerParams {
        &self.scaler
    }

    /// The feature list, in the exact order the model was fitted on.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }
}

/// Summary of one training run, persisted next to the model for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Label of the winning variant.
    pub selected_variant: String,
    /// Held-out metrics of the winning variant.
    pub metrics: Evaluation,
    pub created_at: DateTime<Utc>,
    /// Number of source rows the run was trained and evaluated on.
    pub data_rows: usize,
}

impl RunMetadata {
    /// Creates metadata for a run that just selected `metrics.label`,
    /// stamped with the current time.
    pub fn new(metrics: Evaluation, data_rows: usize) -> Self {
        Self {
            selected_variant: metrics.label.clone(),
            metrics,
            created_at: Utc::now(),
            data_rows,
        }
    }
}
