use std::collections::HashMap;
use std::path::Path;

use log::info;
use ndarray::Array2;
use ort::session::Session;
use ort::value::Tensor;

use super::error::AdvisorError;
use super::features::FEATURE_COUNT;
use crate::runtime::{create_session_builder, RuntimeConfig};

/// Default input name of a classifier exported with a float tensor input.
pub const DEFAULT_INPUT_NAME: &str = "float_input";
/// Default name of the integer label output.
pub const DEFAULT_OUTPUT_NAME: &str = "output_label";

/// A fitted classifier mapping one row of seven scaled features to a crop label.
pub trait CropModel: Send + Sync {
    /// Predicts the label of the first row of `rows`.
    fn predict(&self, rows: &Array2<f64>) -> Result<i64, AdvisorError>;
}

/// Tensor names used to talk to an ONNX classifier.
#[derive(Debug, Clone)]
pub struct ModelSignature {
    pub input_name: String,
    pub output_name: String,
}

impl Default for ModelSignature {
    fn default() -> Self {
        Self {
            input_name: DEFAULT_INPUT_NAME.to_string(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }
}

/// A crop classifier executed through ONNX Runtime.
///
/// The model must take a float32 tensor of shape `[batch, 7]` and produce an
/// int64 label tensor of shape `[batch]`. Any further outputs (class
/// probabilities, for instance) are ignored.
#[derive(Debug)]
pub struct OnnxCropModel {
    session: Session,
    signature: ModelSignature,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<OnnxCropModel>();
    }
};

impl OnnxCropModel {
    /// Loads an ONNX classifier from `path`.
    ///
    /// # Errors
    /// - `BuildError` if the file does not exist
    /// - `ModelError` if ONNX Runtime rejects the file or the signature does not match
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        signature: ModelSignature,
        config: &RuntimeConfig,
    ) -> Result<Self, AdvisorError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AdvisorError::BuildError(format!("Model file not found: {:?}", path)));
        }

        let session = create_session_builder(config)?.commit_from_file(path)?;
        Self::validate_model(&session, &signature)?;
        info!("Crop model loaded from {:?}", path);

        Ok(Self { session, signature })
    }

    pub fn signature(&self) -> &ModelSignature {
        &self.signature
    }

    /// Checks that the session exposes the named input and output.
    fn validate_model(session: &Session, signature: &ModelSignature) -> Result<(), AdvisorError> {
        if !session.inputs.iter().any(|i| i.name == signature.input_name) {
            let found: Vec<&str> = session.inputs.iter().map(|i| i.name.as_str()).collect();
            return Err(AdvisorError::ModelError(format!(
                "Model has no input named '{}' (found {:?})",
                signature.input_name, found
            )));
        }
        if !session.outputs.iter().any(|o| o.name == signature.output_name) {
            let found: Vec<&str> = session.outputs.iter().map(|o| o.name.as_str()).collect();
            return Err(AdvisorError::ModelError(format!(
                "Model has no output named '{}' (found {:?})",
                signature.output_name, found
            )));
        }
        Ok(())
    }
}

impl CropModel for OnnxCropModel {
    fn predict(&self, rows: &Array2<f64>) -> Result<i64, AdvisorError> {
        if rows.ncols() != FEATURE_COUNT {
            return Err(AdvisorError::PredictionError(format!(
                "Expected {} features per row, got {}",
                FEATURE_COUNT,
                rows.ncols()
            )));
        }

        let input = rows.mapv(|v| v as f32);
        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            self.signature.input_name.as_str(),
            Tensor::from_array(input)
                .map_err(|e| AdvisorError::ModelError(format!("Failed to create input tensor: {}", e)))?,
        );

        let outputs = self.session.run(input_tensors)
            .map_err(|e| AdvisorError::ModelError(format!("Failed to run model: {}", e)))?;
        let labels = outputs[self.signature.output_name.as_str()]
            .try_extract_tensor::<i64>()
            .map_err(|e| AdvisorError::ModelError(format!("Failed to extract labels: {}", e)))?;

        let label = labels.iter().next().copied();
        label.ok_or_else(|| AdvisorError::PredictionError("Model returned no label".into()))
    }
}
