use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use ml_core::{Feature, LinearModel, ScalerParams};

use crate::{ArtifactError, ModelBundle, RunMetadata, FORMAT_VERSION};

const MODEL_FILE: &str = "model.json";
const SCALER_FILE: &str = "scaler_params.json";
const FEATURES_FILE: &str = "features.json";
const METADATA_FILE: &str = "metadata.json";

/// On-disk form of the model document.
#[derive(Debug, Serialize, Deserialize)]
struct ModelRecord {
    format_version: u32,
    weights: Vec<f64>,
    intercept: f64,
}

/// File-backed store for the four training artifacts.
///
/// Training overwrites all four documents unconditionally on every run; the
/// serving path reads the three inference documents back into a checked
/// [`ModelBundle`]. No versioning, no concurrent-writer protection: a single
/// trainer and a single predictor are assumed never to run simultaneously
/// against the same directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persists the bundle and run metadata as four JSON documents, creating
    /// the store directory if needed.
    ///
    /// # Errors
    /// Returns `ArtifactError::Io` if the directory or any file cannot be
    /// written.
    pub fn save(&self, bundle: &ModelBundle, metadata: &RunMetadata) -> Result<(), ArtifactError> {
        fs::create_dir_all(&self.dir)?;

        let model = ModelRecord {
            format_version: FORMAT_VERSION,
            weights: bundle.model().weights().to_vec(),
            intercept: bundle.model().intercept(),
        };
        let feature_names: Vec<&str> = bundle.features().iter().map(|f| f.name()).collect();

        self.write_json(MODEL_FILE, &model)?;
        self.write_json(SCALER_FILE, bundle.scaler())?;
        self.write_json(FEATURES_FILE, &feature_names)?;
        self.write_json(METADATA_FILE, metadata)?;

        info!("saved artifacts to {}", self.dir.display());
        Ok(())
    }

    /// Loads the three inference documents and reassembles the bundle.
    ///
    /// # Errors
    /// - `ArtifactError::NotFound` for the first absent file, before any
    ///   partial state is built.
    /// - `ArtifactError::Malformed` for unparsable JSON.
    /// - `ArtifactError::Inconsistent` if the documents disagree with each
    ///   other or carry an unknown format version or feature name.
    pub fn load(&self) -> Result<ModelBundle, ArtifactError> {
        let model: ModelRecord = self.read_json(MODEL_FILE)?;
        let scaler: ScalerParams = self.read_json(SCALER_FILE)?;
        let feature_names: Vec<String> = self.read_json(FEATURES_FILE)?;

        if model.format_version != FORMAT_VERSION {
            return Err(ArtifactError::Inconsistent(format!(
                "unsupported model format version {}",
                model.format_version
            )));
        }

        let features = feature_names
            .iter()
            .map(|name| {
                Feature::from_name(name).ok_or_else(|| {
                    ArtifactError::Inconsistent(format!("unknown feature name {name:?}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        ModelBundle::new(
            LinearModel::from_parts(model.weights, model.intercept),
            scaler,
            features,
        )
    }

    /// Loads the run metadata document.
    ///
    /// # Errors
    /// Same taxonomy as [`ArtifactStore::load`].
    pub fn load_metadata(&self) -> Result<RunMetadata, ArtifactError> {
        self.read_json(METADATA_FILE)
    }

    fn write_json<T: Serialize>(&self, file: &str, value: &T) -> Result<(), ArtifactError> {
        let path = self.dir.join(file);
        let json = serde_json::to_string_pretty(value)
            .map_err(|source| ArtifactError::Malformed {
                path: path.clone(),
                source,
            })?;
        fs::write(&path, json)?;
        Ok(())
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, file: &str) -> Result<T, ArtifactError> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Err(ArtifactError::NotFound(path));
        }
        let raw = fs::read_to_string(&path)?;
        serde_json::from_str(&raw).map_err(|source| ArtifactError::Malformed { path, source })
    }
}
