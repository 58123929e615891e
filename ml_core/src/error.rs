use std::fmt;

/// Errors produced by the core modeling primitives when inputs are invalid.
#[derive(Debug, Clone, PartialEq)]
pub enum MlError {
    /// An input is invalid for semantic or domain reasons.
    InvalidInput(&'static str),

    /// A shape invariant was violated (e.g. mismatched lengths).
    ShapeMismatch {
        /// Human-readable context for the mismatch (e.g. "rows", "weights").
        what: &'static str,
        /// Observed value.
        got: usize,
        /// Expected value.
        expected: usize,
    },

    /// A feature name has no entry in the scaler parameters.
    ///
    /// This indicates stale or mismatched artifacts and must never be
    /// papered over with a default range.
    UnknownFeature(String),

    /// The normal equations are singular and admit no unique solution.
    SingularSystem,
}

impl fmt::Display for MlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            MlError::ShapeMismatch { what, got, expected } => {
                write!(f, "shape mismatch for {what}: got {got}, expected {expected}")
            }
            MlError::UnknownFeature(name) => {
                write!(f, "feature {name:?} has no scaler parameters")
            }
            MlError::SingularSystem => {
                write!(f, "normal equations are singular; cannot fit a unique model")
            }
        }
    }
}

impl std::error::Error for MlError {}
