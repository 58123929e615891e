use std::path::PathBuf;

use log::info;

use artifacts::{ArtifactStore, ModelBundle, RunMetadata};
use ml_core::Evaluation;

use crate::selector::{
    run_variant, select_best, WITHOUT_INDEX, WITHOUT_INDEX_LABEL, WITH_INDEX, WITH_INDEX_LABEL,
};
use crate::{ingest, TrainerError};

/// Everything a training run needs to know.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Cleaned quarterly CSV table.
    pub data_path: PathBuf,
    /// Directory the four artifact documents are written into.
    pub artifacts_dir: PathBuf,
    /// Fraction of rows (oldest first) used for training.
    pub train_ratio: f64,
}

impl TrainingConfig {
    pub fn new(data_path: impl Into<PathBuf>, artifacts_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            artifacts_dir: artifacts_dir.into(),
            train_ratio: 0.8,
        }
    }
}

/// What a finished run reports back to its caller.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub selected_variant: String,
    pub with_index: Evaluation,
    pub without_index: Evaluation,
    pub data_rows: usize,
}

/// Runs the whole training pipeline: ingest, split, fit both variants,
/// select by RMSE, persist the winner.
///
/// # Errors
/// Any ingest, modeling, or persistence failure aborts the run; no fallback
/// model is ever trained or saved.
pub fn run(config: &TrainingConfig) -> Result<TrainingReport, TrainerError> {
    let dataset = ingest::load_dataset(&config.data_path)?;
    let (train, test) = dataset.split(config.train_ratio)?;
    info!(
        "split {} rows into {} train / {} test",
        dataset.len(),
        train.len(),
        test.len()
    );

    let with_index = run_variant(train, test, WITH_INDEX, WITH_INDEX_LABEL)?;
    let without_index = run_variant(train, test, WITHOUT_INDEX, WITHOUT_INDEX_LABEL)?;
    for outcome in [&with_index, &without_index] {
        let e = &outcome.evaluation;
        info!(
            "variant {}: mae={:.4} rmse={:.4} r2={:.4}",
            e.label, e.mae, e.rmse, e.r2
        );
    }

    let winner = select_best(&with_index, &without_index);
    let selected_variant = winner.evaluation.label.clone();
    info!("selected variant {selected_variant}");

    let features = if selected_variant == WITH_INDEX_LABEL {
        WITH_INDEX
    } else {
        WITHOUT_INDEX
    };
    let bundle = ModelBundle::new(
        winner.model.clone(),
        winner.scaler.clone(),
        features.to_vec(),
    )?;
    let metadata = RunMetadata::new(winner.evaluation.clone(), dataset.len());

    let store = ArtifactStore::new(&config.artifacts_dir);
    store.save(&bundle, &metadata)?;

    Ok(TrainingReport {
        selected_variant,
        with_index: with_index.evaluation,
        without_index: without_index.evaluation,
        data_rows: dataset.len(),
    })
}
