use std::fmt;
use std::path::PathBuf;

/// All errors that can occur while persisting or loading model artifacts.
#[derive(Debug)]
pub enum ArtifactError {
    /// A required artifact file is absent. Fatal at predictor startup.
    NotFound(PathBuf),
    /// An artifact file could not be parsed.
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The loaded artifacts disagree with each other (e.g. weight count vs.
    /// feature count) and cannot form a usable bundle.
    Inconsistent(String),
    /// An underlying I/O error not covered by the above variants.
    Io(std::io::Error),
}

impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "artifact not found: {}", path.display()),
            Self::Malformed { path, source } => {
                write!(f, "malformed artifact {}: {source}", path.display())
            }
            Self::Inconsistent(msg) => write!(f, "inconsistent artifacts: {msg}"),
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for ArtifactError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Malformed { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ArtifactError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
