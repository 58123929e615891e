use std::fmt;
use std::path::PathBuf;

use artifacts::ArtifactError;
use ml_core::MlError;

/// All errors that can stop a training run.
#[derive(Debug)]
pub enum TrainerError {
    /// Ingestion produced no usable records; training never starts.
    EmptyDataset(PathBuf),
    /// A core modeling step failed (empty split, singular system, ...).
    Ml(MlError),
    /// Persisting the winning artifacts failed.
    Artifact(ArtifactError),
    /// The source table could not be read.
    Csv(csv::Error),
    /// An underlying I/O error not covered by the above variants.
    Io(std::io::Error),
}

impl fmt::Display for TrainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDataset(path) => {
                write!(f, "no usable records in {}", path.display())
            }
            Self::Ml(e) => write!(f, "modeling error: {e}"),
            Self::Artifact(e) => write!(f, "artifact error: {e}"),
            Self::Csv(e) => write!(f, "csv error: {e}"),
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for TrainerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Ml(e) => Some(e),
            Self::Artifact(e) => Some(e),
            Self::Csv(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::EmptyDataset(_) => None,
        }
    }
}

impl From<MlError> for TrainerError {
    fn from(e: MlError) -> Self {
        Self::Ml(e)
    }
}

impl From<ArtifactError> for TrainerError {
    fn from(e: ArtifactError) -> Self {
        Self::Artifact(e)
    }
}

impl From<csv::Error> for TrainerError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl From<std::io::Error> for TrainerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
