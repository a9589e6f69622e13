use log::info;

use super::advisor::CropAdvisor;
use super::error::AdvisorError;
use super::model::{CropModel, ModelSignature, OnnxCropModel};
use super::scaler::{FeatureScaler, MinMaxScaler, StandardScaler};
use crate::artifact_manager::ArtifactPaths;
use crate::runtime::RuntimeConfig;

/// A builder for constructing a CropAdvisor with a fluent interface.
#[derive(Default)]
pub struct CropAdvisorBuilder {
    min_max_scaler: Option<Box<dyn FeatureScaler>>,
    standard_scaler: Option<Box<dyn FeatureScaler>>,
    model: Option<Box<dyn CropModel>>,
    signature: ModelSignature,
    runtime_config: RuntimeConfig,
}

impl CropAdvisorBuilder {
    /// Creates a new empty CropAdvisorBuilder instance with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the runtime configuration used when loading an ONNX model.
    ///
    /// Only affects models loaded after this call.
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Sets the tensor names used when loading an ONNX model.
    pub fn with_signature(mut self, signature: ModelSignature) -> Self {
        self.signature = signature;
        self
    }

    /// Sets the scaler applied first, to the raw measurements
    pub fn with_min_max_scaler(mut self, scaler: impl FeatureScaler + 'static) -> Self {
        self.min_max_scaler = Some(Box::new(scaler));
        self
    }

    /// Sets the scaler applied second, to the min-max scaled measurements
    pub fn with_standard_scaler(mut self, scaler: impl FeatureScaler + 'static) -> Self {
        self.standard_scaler = Some(Box::new(scaler));
        self
    }

    pub fn with_model(mut self, model: impl CropModel + 'static) -> Self {
        self.model = Some(Box::new(model));
        self
    }

    /// Loads both scalers and the ONNX model from disk.
    ///
    /// # Arguments
    /// * `paths` - Locations of the three fitted artifacts
    ///
    /// # Returns
    /// * `Result<Self, AdvisorError>` - The builder instance if successful, or an error if:
    ///   - Any artifact file is missing or unreadable
    ///   - A scaler does not hold seven fitted values per parameter
    ///   - The model does not expose the configured input and output
    ///
    /// # Example
    /// ```no_run
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use crop_advisor::{ArtifactManager, CropAdvisor};
    ///
    /// let manager = ArtifactManager::new("artifacts")?;
    /// let advisor = CropAdvisor::builder()
    ///     .with_artifacts(&manager.paths())?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_artifacts(self, paths: &ArtifactPaths) -> Result<Self, AdvisorError> {
        let min_max = MinMaxScaler::from_file(&paths.min_max_scaler)?;
        info!("Min-max scaler loaded from {:?}", paths.min_max_scaler);
        let standard = StandardScaler::from_file(&paths.standard_scaler)?;
        info!("Standard scaler loaded from {:?}", paths.standard_scaler);
        let model = OnnxCropModel::from_file(&paths.model, self.signature.clone(), &self.runtime_config)?;

        Ok(self
            .with_min_max_scaler(min_max)
            .with_standard_scaler(standard)
            .with_model(model))
    }

    /// Builds and returns the final CropAdvisor instance
    ///
    /// # Returns
    /// * `Result<CropAdvisor, AdvisorError>` - The constructed advisor, or a `BuildError`
    ///   naming the first component that was never set
    pub fn build(self) -> Result<CropAdvisor, AdvisorError> {
        let min_max_scaler = self.min_max_scaler
            .ok_or_else(|| AdvisorError::BuildError("Min-max scaler must be set".into()))?;
        let standard_scaler = self.standard_scaler
            .ok_or_else(|| AdvisorError::BuildError("Standard scaler must be set".into()))?;
        let model = self.model
            .ok_or_else(|| AdvisorError::BuildError("Crop model must be set".into()))?;

        Ok(CropAdvisor {
            min_max_scaler,
            standard_scaler,
            model,
        })
    }
}
