use std::fmt;

use artifacts::ArtifactError;
use ml_core::MlError;

/// All errors the serving path can produce.
#[derive(Debug)]
pub enum PredictError {
    /// The caller's input lacks a feature the stored model requires.
    /// Rejected before any scaling or logging happens.
    MissingFeature(String),
    /// Loading or validating the persisted artifacts failed. Fatal at
    /// predictor startup.
    Artifact(ArtifactError),
    /// Scaling or applying the model failed.
    Ml(MlError),
    /// The prediction log could not be written.
    Log(csv::Error),
    /// An underlying I/O error not covered by the above variants.
    Io(std::io::Error),
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFeature(name) => {
                write!(f, "input is missing required feature {name:?}")
            }
            Self::Artifact(e) => write!(f, "artifact error: {e}"),
            Self::Ml(e) => write!(f, "modeling error: {e}"),
            Self::Log(e) => write!(f, "prediction log error: {e}"),
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for PredictError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Artifact(e) => Some(e),
            Self::Ml(e) => Some(e),
            Self::Log(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::MissingFeature(_) => None,
        }
    }
}

impl From<ArtifactError> for PredictError {
    fn from(e: ArtifactError) -> Self {
        Self::Artifact(e)
    }
}

impl From<MlError> for PredictError {
    fn from(e: MlError) -> Self {
        Self::Ml(e)
    }
}

impl From<csv::Error> for PredictError {
    fn from(e: csv::Error) -> Self {
        Self::Log(e)
    }
}

impl From<std::io::Error> for PredictError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
