use ort::Error as OrtError;
use thiserror::Error;

/// Problems with the raw form values before anything reaches the model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// A required measurement was not submitted
    #[error("Missing value for {0}")]
    Missing(&'static str),
    /// A measurement could not be read as a number
    #[error("{field} must be a number, got {value:?}")]
    Invalid { field: &'static str, value: String },
}

/// Represents the different types of errors that can occur while producing a recommendation.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Error occurred while reading or parsing a fitted artifact
    #[error("Artifact error: {0}")]
    ArtifactError(String),
    /// Error occurred while loading or running the ONNX model
    #[error("Model error: {0}")]
    ModelError(String),
    /// Error occurred during the build phase
    #[error("Build error: {0}")]
    BuildError(String),
    /// Error occurred while transforming features or making predictions
    #[error("Prediction error: {0}")]
    PredictionError(String),
    /// Error occurred due to invalid input values
    #[error("Validation error: {0}")]
    ValidationError(#[from] FeatureError),
}

impl AdvisorError {
    /// True when the caller supplied bad input, as opposed to a server side fault.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}

impl From<OrtError> for AdvisorError {
    fn from(err: OrtError) -> Self {
        AdvisorError::ModelError(err.to_string())
    }
}
